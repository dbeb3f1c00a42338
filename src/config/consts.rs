// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://www.namus.gov/api";
pub const USER_AGENT: &str = "NamUs Scraper / Academic Research Project";
pub const STATES_PATH: &str = "/CaseSets/NamUs/States";
pub const SEARCH_PATH: &str = "/CaseSets/NamUs/{type}/Search";
pub const CASE_PATH: &str = "/CaseSets/NamUs/{type}/Cases/{case}";

// Case types: (type, field the region filter applies to)
pub const MISSING_PERSONS: &str = "MissingPersons";
pub const MISSING_PERSONS_REGION_FIELD: &str = "stateOfLastContact";

// Search
pub const SEARCH_LIMIT: usize = 10_000;
pub const ID_PROJECTION: &str = "namus2Number";

// Concurrency
pub const BATCH_SIZE: usize = 25;
pub const PAUSE_MIN_MS: u64 = 500; // be polite
pub const PAUSE_MAX_MS: u64 = 1_500;
pub const FEEDBACK_INTERVAL: usize = 50;

// Staging
pub const STAGING_DIR: &str = "MissingPersons";

// Export
pub const DEFAULT_OUT_DIR: &str = "output";
pub const DEFAULT_FILE: &str = "NamUs_Master_Robust_v3.csv";
/// Staged files whose name contains this are never read back as input.
pub const OUTPUT_MARKER: &str = "NamUs";

// Env overrides
pub const ENV_API_BASE: &str = "NAMUS_API_BASE";
pub const ENV_DATA_DIR: &str = "NAMUS_DATA_DIR";
pub const ENV_OUTPUT_FILE: &str = "NAMUS_OUTPUT_FILE";
pub const ENV_BATCH_SIZE: &str = "NAMUS_BATCH_SIZE";
pub const ENV_DELAY_MS: &str = "NAMUS_DELAY_MS";
pub const ENV_SKIP_REGIONS: &str = "NAMUS_SKIP_REGIONS";
pub const ENV_RESUME_FROM: &str = "NAMUS_RESUME_FROM";
