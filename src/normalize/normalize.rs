// src/normalize/normalize.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::row::FlatRow;
use super::table::MasterTable;
use crate::config::options::NormalizeOptions;
use crate::error::{Error, RecordError, Result};
use crate::file::discover_staged;

/// What a Normalizer run did. Every skip is counted, never raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub files_read: usize,
    pub files_skipped: Vec<(PathBuf, String)>,
    pub records_seen: usize,
    pub records_skipped: BTreeMap<RecordError, usize>,
    pub duplicates: usize,
    pub rows_written: usize,
    pub output: Option<PathBuf>,
}

impl NormalizeSummary {
    pub fn skipped_records(&self) -> usize {
        self.records_skipped.values().sum()
    }
}

/// Load one staged archive. The top level must be a JSON array; a truncated
/// archive from an interrupted Collector fails here.
pub fn read_archive(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Array(items) => Ok(items),
        _ => Err(Error::NotAnArray(path.to_path_buf())),
    }
}

/// Derive rows for every record of one archive into `table`.
pub fn absorb(records: &[Value], table: &mut MasterTable, summary: &mut NormalizeSummary) {
    for rec in records {
        summary.records_seen += 1;
        match FlatRow::from_record(rec) {
            Ok(row) => { table.push(row); }
            Err(e) => {
                debug!("Skipping record: {e}");
                *summary.records_skipped.entry(e).or_insert(0) += 1;
            }
        }
    }
}

/// Flatten every staged archive in `opts.in_dir` into `opts.out_file`.
/// Writes nothing when no row survives.
pub fn run(opts: &NormalizeOptions) -> Result<NormalizeSummary> {
    let files = discover_staged(&opts.in_dir, &opts.exclude_marker)?;
    info!("Found {} staged files in {}", files.len(), opts.in_dir.display());

    let mut summary = NormalizeSummary::default();
    let mut table = MasterTable::new();

    for path in files {
        let records = match read_archive(&path) {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                summary.files_skipped.push((path, e.to_string()));
                continue;
            }
        };
        summary.files_read += 1;
        debug!("{}: {} records", path.display(), records.len());
        absorb(&records, &mut table, &mut summary);
    }

    summary.duplicates = table.duplicates();

    if table.is_empty() {
        info!("No cases found.");
        return Ok(summary);
    }

    table.write(&opts.out_file)?;
    summary.rows_written = table.len();
    summary.output = Some(opts.out_file.clone());

    info!(
        "Processed {} records into {} unique cases ({} skipped, {} duplicates)",
        summary.records_seen - summary.skipped_records(),
        summary.rows_written,
        summary.skipped_records(),
        summary.duplicates,
    );
    info!("Saved to: {}", opts.out_file.display());
    Ok(summary)
}
