use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::record::{Endian, RawPropertyRecord};

/// Property records loaded from a JSON dump.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<RawPropertyRecord>,
    /// Byte order declared by the dump, if any.
    pub byte_order: Option<Endian>,
    /// Entries that could not be parsed and were left out.
    pub skipped: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpFile {
    Wrapped {
        #[serde(default)]
        byte_order: Option<Endian>,
        records: Vec<serde_json::Value>,
    },
    Bare(Vec<serde_json::Value>),
}

/// Read a record dump from disk.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record dump {}", path.display()))?;
    parse_records(&contents).with_context(|| format!("Invalid record dump {}", path.display()))
}

/// Parse a record dump: either `{"byte_order": ..., "records": [...]}` or a
/// bare array. Entries that fail to parse are skipped, not fatal.
pub fn parse_records(json: &str) -> Result<RecordSet> {
    let dump: DumpFile = serde_json::from_str(json).context("Failed to parse record dump")?;
    let (byte_order, entries) = match dump {
        DumpFile::Wrapped {
            byte_order,
            records,
        } => (byte_order, records),
        DumpFile::Bare(records) => (None, records),
    };

    let mut set = RecordSet {
        records: Vec::with_capacity(entries.len()),
        byte_order,
        skipped: 0,
    };

    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawPropertyRecord>(entry) {
            Ok(record) => set.records.push(record),
            Err(e) => {
                log::warn!("Skipping record #{i}: {e}");
                set.skipped += 1;
            }
        }
    }

    Ok(set)
}
