// src/collect/mod.rs
//! # Collector
//!
//! Pulls full case details from the case API and stages them as one JSON
//! array file per region.
//!
//! ```text
//! list_regions → per region: search_case_ids → batches of fetch_case_detail
//!                                             ↘ ArchiveWriter → <Region>.json
//! ```
//!
//! Detail requests run `batch_size` at a time on scoped threads; a batch is
//! fully gathered before it is written, then the Collector pauses a random
//! interval from `PauseRange`. Failed fetches are dropped from the archive
//! and counted. A failed search skips only its region.
mod collect;
pub mod api;
pub mod archive;

pub use api::{CaseReference, CaseSource, Region};
pub use archive::{ArchiveWriter, open_region_archive};
pub use collect::{CollectSummary, RegionOutcome, RegionReport, collect_region, fetch_batch, run};
