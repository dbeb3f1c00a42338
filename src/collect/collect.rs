// src/collect/collect.rs
use std::{path::PathBuf, thread};

use tracing::{debug, info, warn};

use super::api::{CaseReference, CaseSource, Region};
use super::archive::open_region_archive;
use crate::{
    config::options::{CaseType, CollectOptions},
    error::{Error, Result},
    progress::Progress,
};

/// How one region of one case type ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionOutcome {
    /// Archive written; `failed` detail fetches were dropped.
    Written { path: PathBuf, written: usize, failed: usize },
    /// Search found no cases; no file written.
    Empty,
    /// Operator skip list.
    Skipped(String),
    /// Search or archive I/O failed; the run moved on.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionReport {
    pub case_type: String,
    pub region: String,
    pub outcome: RegionOutcome,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub regions: Vec<RegionReport>,
}

impl CollectSummary {
    pub fn cases_written(&self) -> usize {
        self.regions.iter().map(|r| match r.outcome {
            RegionOutcome::Written { written, .. } => written,
            _ => 0,
        }).sum()
    }

    pub fn cases_dropped(&self) -> usize {
        self.regions.iter().map(|r| match r.outcome {
            RegionOutcome::Written { failed, .. } => failed,
            _ => 0,
        }).sum()
    }

    pub fn count(&self, pred: impl Fn(&RegionOutcome) -> bool) -> usize {
        self.regions.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Collect every case of every configured case type in every listed region.
/// Only the region listing is fatal; everything after it degrades per region.
pub fn run<S: CaseSource + Sync>(
    src: &S,
    opts: &CollectOptions,
    progress: &mut dyn Progress,
) -> Result<CollectSummary> {
    progress.log("Fetching regions list...");
    let regions = src.list_regions()?;
    info!("{} regions listed", regions.len());

    let mut summary = CollectSummary::default();

    for case_type in &opts.case_types {
        progress.log(&format!("Targeting case type: {}", case_type.name));
        let mut skip = opts.skip.cursor();

        for region in &regions {
            let outcome = match skip.check(&region.name) {
                Some(reason) => {
                    info!("Skipping {} ({reason})", region.name);
                    RegionOutcome::Skipped(reason)
                }
                None => collect_region(src, opts, case_type, region, progress),
            };
            summary.regions.push(RegionReport {
                case_type: case_type.name.clone(),
                region: region.name.clone(),
                outcome,
            });
        }
    }

    info!(
        "Collection finished: {} cases staged, {} dropped, {} regions failed",
        summary.cases_written(),
        summary.cases_dropped(),
        summary.count(|o| matches!(o, RegionOutcome::Failed(_))),
    );
    Ok(summary)
}

/// Search one region and stream its case details into the region archive.
pub fn collect_region<S: CaseSource + Sync>(
    src: &S,
    opts: &CollectOptions,
    case_type: &CaseType,
    region: &Region,
    progress: &mut dyn Progress,
) -> RegionOutcome {
    info!("--- Processing region: {} ---", region.name);

    let cases = match src.search_case_ids(case_type, region, opts.search_limit) {
        Ok(c) => c,
        Err(e) => {
            warn!("Error searching {}: {e}", region.name);
            return RegionOutcome::Failed(format!("search: {e}"));
        }
    };
    info!("Found {} cases in {}", cases.len(), region.name);
    if cases.is_empty() {
        return RegionOutcome::Empty;
    }

    progress.begin(&region.name, cases.len());
    let result = stage_cases(src, opts, case_type, region, &cases, progress);
    progress.finish();

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Error writing archive for {}: {e}", region.name);
            RegionOutcome::Failed(format!("archive: {e}"))
        }
    }
}

fn stage_cases<S: CaseSource + Sync>(
    src: &S,
    opts: &CollectOptions,
    case_type: &CaseType,
    region: &Region,
    cases: &[CaseReference],
    progress: &mut dyn Progress,
) -> Result<RegionOutcome> {
    let (path, mut archive) = open_region_archive(&opts.out_dir, &region.name)?;
    info!("Exporting to {}", path.display());

    let mut rng = rand::thread_rng();
    let mut failed = 0usize;

    for batch in cases.chunks(opts.batch_size.max(1)) {
        for (case, result) in batch.iter().zip(fetch_batch(src, case_type, batch)) {
            match result {
                Ok(body) => {
                    archive.push(&body)?;
                    progress.item_done();
                }
                Err(e) => {
                    debug!("Dropped case {} in {}: {e}", case.id, region.name);
                    failed += 1;
                    progress.item_failed();
                }
            }
        }
        thread::sleep(opts.pause.sample(&mut rng));
    }

    let written = archive.written();
    archive.finish()?;
    Ok(RegionOutcome::Written { path, written, failed })
}

/// Fetch one batch concurrently, one scoped thread per case, and gather
/// every result (in request order) before returning.
pub fn fetch_batch<S: CaseSource + Sync>(
    src: &S,
    case_type: &CaseType,
    batch: &[CaseReference],
) -> Vec<Result<String>> {
    thread::scope(|s| {
        let handles: Vec<_> = batch
            .iter()
            .map(|case| s.spawn(move || src.fetch_case_detail(case_type, case)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Err(Error::WorkerPanic)))
            .collect()
    })
}
