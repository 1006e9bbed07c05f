//! Constants used throughout the symptom checker core crate.
//!
//! Matching thresholds, configuration defaults and the baseline checklist live here so the
//! matcher, the catalog and the binaries agree on them.

/// Minimum number of matched symptoms for a condition to appear in the primary result.
pub const PRIMARY_MATCH_THRESHOLD: usize = 3;

/// Minimum number of matched symptoms for a condition to appear in the fallback result.
pub const FALLBACK_MATCH_THRESHOLD: usize = 1;

/// Maximum number of conditions returned by a single check.
pub const MAX_RESULTS: usize = 3;

/// Default condition store used when `SYMPTOM_DB_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://symptom_checker.db";

/// Default pool acquire timeout, in seconds.
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;

/// Maximum number of pooled connections to the condition store.
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Fixed symptom vocabulary shown on the checklist before any catalog symptoms.
pub const BASELINE_SYMPTOMS: &[&str] = &[
    "Fever",
    "Cough",
    "Headache",
    "Sore Throat",
    "Body Aches",
    "Fatigue",
    "Runny Nose",
    "Sneezing",
    "Nausea",
    "Stomach Pain",
    "Dizziness",
    "Chest Pain",
    "Shortness of Breath",
    "Loss of Appetite",
    "Chills",
];
