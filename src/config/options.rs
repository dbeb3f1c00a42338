// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

use super::consts::*;
use crate::error::{Error, Result};

/* ---------------- Collector ---------------- */

/// One searchable case set and the field its region predicate filters on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseType {
    pub name: String,
    pub region_field: String,
}

impl CaseType {
    pub fn new(name: &str, region_field: &str) -> Self {
        Self { name: name.to_string(), region_field: region_field.to_string() }
    }
}

/// Uniform politeness pause taken after every detail batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PauseRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for PauseRange {
    fn default() -> Self {
        Self { min_ms: PAUSE_MIN_MS, max_ms: PAUSE_MAX_MS }
    }
}

impl PauseRange {
    /// "500-1500" or a single "750".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (a, b) = match s.split_once('-') {
            Some((a, b)) => (a.trim().parse().ok()?, b.trim().parse().ok()?),
            None => {
                let v = s.parse().ok()?;
                (v, v)
            }
        };
        if a > b { return None; }
        Some(Self { min_ms: a, max_ms: b })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}

/// Operator-driven resume: regions named in `names` are skipped, and when
/// `resume_from` is set every region before it is skipped too.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipList {
    pub names: Vec<String>,
    pub resume_from: Option<String>,
}

impl SkipList {
    /// Walks regions in listing order; returns a reason when `region` is skipped.
    pub fn cursor(&self) -> SkipCursor<'_> {
        SkipCursor { list: self, waiting: self.resume_from.is_some() }
    }
}

pub struct SkipCursor<'a> {
    list: &'a SkipList,
    waiting: bool,
}

impl SkipCursor<'_> {
    pub fn check(&mut self, region: &str) -> Option<String> {
        if self.waiting {
            if self.list.resume_from.as_deref() == Some(region) {
                self.waiting = false;
            } else {
                return Some("before resume point".into());
            }
        }
        if self.list.names.iter().any(|n| n == region) {
            return Some("in skip list".into());
        }
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    pub api_base: String,
    pub user_agent: String,
    pub case_types: Vec<CaseType>,
    pub search_limit: usize,
    pub batch_size: usize,
    pub pause: PauseRange,
    pub feedback_interval: usize,
    pub out_dir: PathBuf,
    pub skip: SkipList,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            case_types: vec![CaseType::new(MISSING_PERSONS, MISSING_PERSONS_REGION_FIELD)],
            search_limit: SEARCH_LIMIT,
            batch_size: BATCH_SIZE,
            pause: PauseRange::default(),
            feedback_interval: FEEDBACK_INTERVAL,
            out_dir: PathBuf::from(STAGING_DIR),
            skip: SkipList::default(),
        }
    }
}

impl CollectOptions {
    pub fn from_env() -> Result<Self> {
        let mut opts = Self::default();
        opts.apply_env(|k| std::env::var(k).ok())?;
        Ok(opts)
    }

    /// Apply overrides from any key lookup (the process env in production).
    pub fn apply_env<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get(ENV_API_BASE) {
            self.api_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get(ENV_DATA_DIR) {
            self.out_dir = PathBuf::from(v).join(STAGING_DIR);
        }
        if let Some(v) = get(ENV_BATCH_SIZE) {
            self.batch_size = match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(Error::BadOption { key: ENV_BATCH_SIZE, value: v }),
            };
        }
        if let Some(v) = get(ENV_DELAY_MS) {
            self.pause = PauseRange::parse(&v)
                .ok_or(Error::BadOption { key: ENV_DELAY_MS, value: v.clone() })?;
        }
        if let Some(v) = get(ENV_SKIP_REGIONS) {
            self.skip.names = split_list(&v);
        }
        if let Some(v) = get(ENV_RESUME_FROM) {
            let v = v.trim();
            self.skip.resume_from = (!v.is_empty()).then(|| v.to_string());
        }
        Ok(())
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/* ---------------- Normalizer ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub in_dir: PathBuf,
    pub out_file: PathBuf,
    pub exclude_marker: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            in_dir: PathBuf::from(STAGING_DIR),
            out_file: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_FILE),
            exclude_marker: OUTPUT_MARKER.to_string(),
        }
    }
}

impl NormalizeOptions {
    pub fn from_env() -> Result<Self> {
        let mut opts = Self::default();
        opts.apply_env(|k| std::env::var(k).ok())?;
        Ok(opts)
    }

    pub fn apply_env<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get(ENV_DATA_DIR) {
            let base = PathBuf::from(v);
            self.in_dir = base.join(STAGING_DIR);
            self.out_file = base.join(DEFAULT_OUT_DIR).join(DEFAULT_FILE);
        }
        if let Some(v) = get(ENV_OUTPUT_FILE) {
            if v.trim().is_empty() {
                return Err(Error::BadOption { key: ENV_OUTPUT_FILE, value: v });
            }
            self.out_file = PathBuf::from(v);
        }
        Ok(())
    }
}
