// src/normalize/mod.rs
//! # Normalizer
//!
//! Reads the staged per-region archives and flattens every case record into
//! one `FlatRow`, then writes the deduplicated master table as CSV.
//!
//! ```text
//! staged *.json → read_archive → FlatRow::from_record → MasterTable → CSV
//! ```
//!
//! Field lookup is schema-tolerant: each column lists alternate key paths
//! (`path::resolve`) because the same data lives in different places across
//! regions and over time. A record that cannot produce a full row is skipped
//! with a `RecordError`; a file that is not a readable JSON array is skipped
//! whole. Neither stops the run.
pub mod derive;
pub mod lists;
pub mod path;
pub mod row;
pub mod table;
mod normalize;

pub use normalize::{NormalizeSummary, absorb, read_archive, run};
pub use row::{FlatRow, HEADERS};
pub use table::MasterTable;
