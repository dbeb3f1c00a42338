// src/progress.rs
use tracing::info;

/// Progress reporting for the Collector's per-region detail downloads.
/// The sink owns its counters; nothing is process-wide.
pub trait Progress {
    /// Called at the start of a region with the number of cases found.
    fn begin(&mut self, _region: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One case detail was downloaded and staged.
    fn item_done(&mut self) {}

    /// One case detail was dropped (bad status, transport error, bad body).
    fn item_failed(&mut self) {}

    /// Called at the end of a region, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Logs a line every `interval` handled downloads (staged or dropped), plus a
/// per-region tally.
pub struct LogProgress {
    interval: usize,
    region: String,
    total: usize,
    done: usize,
    failed: usize,
}

impl LogProgress {
    pub fn new(interval: usize) -> Self {
        Self { interval: interval.max(1), region: String::new(), total: 0, done: 0, failed: 0 }
    }

    pub fn done(&self) -> usize { self.done }
    pub fn failed(&self) -> usize { self.failed }
    pub fn handled(&self) -> usize { self.done + self.failed }

    /// True when the latest response lands on the feedback cadence.
    fn on_cadence(&self) -> bool {
        self.handled() % self.interval == 0
    }

    fn report(&self) {
        info!(
            "  - Progress: {} / {} case details handled ({}, {} dropped)",
            self.handled(), self.total, self.region, self.failed
        );
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, region: &str, total: usize) {
        self.region = region.to_string();
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self) {
        self.done += 1;
        if self.on_cadence() { self.report(); }
    }

    fn item_failed(&mut self) {
        self.failed += 1;
        if self.on_cadence() { self.report(); }
    }

    fn finish(&mut self) {
        info!(
            "Finished {}: {} staged, {} dropped",
            self.region, self.done, self.failed
        );
    }
}
