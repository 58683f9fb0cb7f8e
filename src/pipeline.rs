use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::exif::{self, CollectionBuilder, Decoder, TagCollection, TagRegistry};

/// Extensions of record dump files.
const DUMP_EXTENSIONS: &[&str] = &["json"];

/// The result of decoding a single record dump.
///
/// # Example
///
/// ```rust,no_run
/// # use exif_decode::pipeline::process_dump;
/// # use exif_decode::exif::TagRegistry;
/// # use exif_decode::config::Config;
/// let result = process_dump("photo.json".as_ref(), TagRegistry::standard(), &Config::default());
///
/// if let Some(ref tags) = result.collection {
///     for tag in tags.present() {
///         println!("{tag}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ProcessResult {
    pub path: PathBuf,
    pub collection: Option<TagCollection>,
    /// Records read from the dump.
    pub record_count: usize,
    /// Dump entries that could not be parsed.
    pub skipped_records: usize,
    pub error: Option<String>,
}

impl ProcessResult {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            collection: None,
            record_count: 0,
            skipped_records: 0,
            error: Some(error),
        }
    }
}

/// Collect record dumps from the given paths.
///
/// Files are kept when they carry a dump extension. Directories are walked
/// recursively, following symlinks; entries the walk cannot read are logged
/// and skipped.
pub fn collect_dumps(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut dumps = Vec::new();

    for path in paths {
        if path.is_dir() {
            dumps.extend(walk_dumps(path));
        } else if !path.is_file() {
            log::warn!("Path does not exist: {}", path.display());
        } else if is_dump_file(path) {
            dumps.push(path.clone());
        } else {
            log::warn!("Not a record dump, skipping: {}", path.display());
        }
    }

    dumps
}

fn walk_dumps(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {e}", root.display());
                None
            }
        })
        .filter(|p| p.is_file() && is_dump_file(p))
        .collect()
}

fn is_dump_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DUMP_EXTENSIONS.iter().any(|d| ext.eq_ignore_ascii_case(d)))
}

/// Read one dump and decode it against `registry`.
///
/// The dump's own byte order takes precedence over the configured one.
/// I/O and JSON failures end up in [`ProcessResult::error`].
pub fn process_dump(path: &Path, registry: &TagRegistry, config: &Config) -> ProcessResult {
    let set = match exif::read_records(path) {
        Ok(set) => set,
        Err(e) => {
            log::error!("{}: {e:#}", path.display());
            return ProcessResult::failed(path, format!("{e:#}"));
        }
    };

    if set.skipped > 0 {
        log::warn!(
            "{}: skipped {} unreadable record(s)",
            path.display(),
            set.skipped
        );
    }

    let endian = set.byte_order.unwrap_or(config.decoder.byte_order);
    let collection = CollectionBuilder::new(registry, Decoder::new(endian)).build(&set.records);

    ProcessResult {
        path: path.to_path_buf(),
        collection: Some(collection),
        record_count: set.records.len(),
        skipped_records: set.skipped,
        error: None,
    }
}

/// Decode every dump, preserving input order. Runs on the rayon pool when
/// `config.decoder.parallel` is set.
pub fn process_all(paths: &[PathBuf], registry: &TagRegistry, config: &Config) -> Vec<ProcessResult> {
    if config.decoder.parallel {
        paths
            .par_iter()
            .map(|p| process_dump(p, registry, config))
            .collect()
    } else {
        paths
            .iter()
            .map(|p| process_dump(p, registry, config))
            .collect()
    }
}
