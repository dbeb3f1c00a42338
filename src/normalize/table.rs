// src/normalize/table.rs

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use super::row::FlatRow;
use crate::error::Result;
use crate::file::ensure_parent;

/// Unique rows in arrival order. The first row seen for a case id is kept;
/// later duplicates are dropped.
#[derive(Debug, Default)]
pub struct MasterTable {
    rows: Vec<FlatRow>,
    seen: HashSet<String>,
    duplicates: usize,
}

impl MasterTable {
    pub fn new() -> Self { Self::default() }

    /// Returns `false` when the case id is already present.
    pub fn push(&mut self, row: FlatRow) -> bool {
        if !self.seen.insert(row.namus_id.clone()) {
            self.duplicates += 1;
            return false;
        }
        self.rows.push(row);
        true
    }

    pub fn rows(&self) -> &[FlatRow] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn duplicates(&self) -> usize { self.duplicates }

    /// Header + one row per case, every field quoted.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        let mut w = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(out);
        for row in &self.rows {
            w.serialize(row)?;
        }
        if self.rows.is_empty() {
            w.write_record(super::row::HEADERS)?;
        }
        w.flush()?;
        Ok(())
    }

    /// Create the parent directory if needed and overwrite `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}
