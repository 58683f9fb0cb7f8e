use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use exif_decode::exif::{DecodedTag, Endian, IfdKind, TagCollection, TagRegistry};
use exif_decode::{config, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exif-decode",
    version,
    about = "Decode raw EXIF property records into readable tag values"
)]
struct Cli {
    /// Record dump files (.json) or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// List tags without a value too
    #[arg(long)]
    all: bool,

    /// One "description (name) = value" line per tag instead of a table
    #[arg(long)]
    plain: bool,

    /// Byte order for dumps that do not declare one
    #[arg(long, value_enum, value_name = "ORDER")]
    byte_order: Option<ByteOrder>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ByteOrder {
    Little,
    Big,
}

impl From<ByteOrder> for Endian {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Endian::Little,
            ByteOrder::Big => Endian::Big,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    // Load config, then apply CLI overrides
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.json {
        config.output.json = true;
    }
    if cli.all {
        config.output.include_empty = true;
    }
    if let Some(order) = cli.byte_order {
        config.decoder.byte_order = order.into();
    }

    let dumps = pipeline::collect_dumps(&cli.paths);
    if dumps.is_empty() {
        anyhow::bail!("No record dumps found in the specified paths.");
    }

    let total = dumps.len();
    log::info!("Found {total} record dump(s) to decode");

    let registry = TagRegistry::standard();
    let results = pipeline::process_all(&dumps, registry, &config);

    if config.output.json {
        let json_results: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                let tags = r.collection.as_ref().map(|c| {
                    c.iter()
                        .filter(|t| config.output.include_empty || t.has_value())
                        .collect::<Vec<_>>()
                });
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "records": r.record_count,
                    "skipped_records": r.skipped_records,
                    "gps": r.collection.as_ref().and_then(TagCollection::gps_coordinates),
                    "tags": tags,
                    "error": r.error,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    } else {
        for result in &results {
            match (&result.collection, &result.error) {
                (Some(tags), _) if cli.plain => print_plain(tags, config.output.include_empty),
                (Some(tags), _) => print_collection(&result.path, tags, config.output.include_empty),
                (None, Some(err)) => log::error!("{}: {err}", result.path.display()),
                (None, None) => {}
            }
        }
    }

    // Summary
    let success = results.iter().filter(|r| r.error.is_none()).count();
    let failed = total - success;
    let skipped: usize = results.iter().map(|r| r.skipped_records).sum();
    log::info!(
        "Done: {success} decoded, {failed} failed out of {total} dumps ({skipped} records skipped)"
    );

    Ok(())
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const SECTIONS: [IfdKind; 4] = [IfdKind::Image, IfdKind::Exif, IfdKind::Interop, IfdKind::Gps];

/// Width of the tag name column.
const NAME_WIDTH: usize = 28;
/// Max characters in the value column before wrapping.
const VAL_WIDTH: usize = 40;

/// Print a decoded collection, organized by IFD.
fn print_collection(path: &std::path::Path, tags: &TagCollection, include_empty: bool) {
    println!();
    println!("{BOLD}File:{RESET} {}", path.display());
    println!("{DIM}{}{RESET}", "═".repeat(72));

    let mut printed = 0;
    for section in SECTIONS {
        let rows: Vec<_> = tags
            .iter()
            .filter(|t| t.key().ifd == section)
            .filter(|t| include_empty || t.has_value())
            .collect();
        if rows.is_empty() {
            continue;
        }

        println!("  {BOLD}{}{RESET}", section.title());
        println!("  {DIM}{}{RESET}", "─".repeat(70));
        for tag in rows {
            print_row(tag);
            printed += 1;
        }
        println!();
    }

    if let Some(gps) = tags.gps_coordinates() {
        println!(
            "  {GREEN}{:<NAME_WIDTH$}{RESET} : {:.6}, {:.6}",
            "Position", gps.latitude, gps.longitude
        );
        println!();
    }

    if printed == 0 {
        println!("  {DIM}(no EXIF metadata found){RESET}");
        println!();
    }
}

/// Print `description (name) = value` lines.
fn print_plain(tags: &TagCollection, include_empty: bool) {
    for tag in tags.iter().filter(|t| include_empty || t.has_value()) {
        println!("{tag}");
    }
}

/// Print one tag as `name : value`, continuing long values under the value
/// column. Tags without a value print a dimmed dash.
fn print_row(tag: &DecodedTag) {
    if !tag.has_value() {
        println!("  {DIM}{:<NAME_WIDTH$} : -{RESET}", tag.name());
        return;
    }

    let mut lines = wrap_value(&tag.value, VAL_WIDTH).into_iter();
    if let Some(first) = lines.next() {
        println!("  {:<NAME_WIDTH$} : {first}", tag.name());
    }
    for line in lines {
        println!("  {:NAME_WIDTH$}   {line}", "");
    }
}

/// Split a value into lines of at most `width` characters, breaking between
/// words. A single word longer than `width` keeps its own line.
fn wrap_value(value: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for word in value.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + 1 + word.chars().count() <= width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_owned()),
        }
    }

    lines
}
