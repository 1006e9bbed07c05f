//! Condition catalog resolution.
//!
//! The catalog is resolved once per session, before any matching happens:
//!
//! 1. Ask the configured [`CatalogProvider`] (normally the relational store) for conditions.
//! 2. If that fails, or yields no conditions, substitute the built-in defaults.
//!
//! The matcher never sees where its input came from; [`ResolvedCatalog::source`] records it
//! for logging and for front-ends that want to show it.

use crate::condition::{Condition, ConditionName};
use crate::config::CoreConfig;
use crate::constants::BASELINE_SYMPTOMS;
use crate::error::CatalogResult;
use crate::repository::ConditionRepository;
use std::collections::HashSet;
use std::future::Future;

/// Anything that can produce the ordered list of conditions for a session.
pub trait CatalogProvider {
    /// Loads every condition, in a stable order. An empty list is not an error.
    fn load_catalog(&self) -> impl Future<Output = CatalogResult<Vec<Condition>>> + Send;
}

/// Why the built-in defaults were used instead of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No store is configured.
    NotConfigured,
    /// The store answered with zero conditions.
    Empty,
    /// The store could not be read.
    LoadFailed(String),
}

/// Where the conditions of a [`ResolvedCatalog`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Store,
    Defaults(FallbackReason),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Store => f.write_str("condition store"),
            CatalogSource::Defaults(FallbackReason::NotConfigured) => {
                f.write_str("built-in defaults (no condition store configured)")
            }
            CatalogSource::Defaults(FallbackReason::Empty) => {
                f.write_str("built-in defaults (condition store is empty)")
            }
            CatalogSource::Defaults(FallbackReason::LoadFailed(detail)) => {
                write!(f, "built-in defaults (condition store failed: {detail})")
            }
        }
    }
}

/// A non-empty catalog ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalog {
    conditions: Vec<Condition>,
    source: CatalogSource,
}

impl ResolvedCatalog {
    /// The built-in catalog, recording why it was chosen.
    pub fn defaults(reason: FallbackReason) -> Self {
        Self {
            conditions: default_conditions(),
            source: CatalogSource::Defaults(reason),
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn into_parts(self) -> (Vec<Condition>, CatalogSource) {
        (self.conditions, self.source)
    }
}

/// Applies the fallback policy to the outcome of a store load.
pub fn resolve_loaded(loaded: CatalogResult<Vec<Condition>>) -> ResolvedCatalog {
    match loaded {
        Ok(conditions) if !conditions.is_empty() => {
            tracing::info!(count = conditions.len(), "loaded conditions from store");
            ResolvedCatalog {
                conditions,
                source: CatalogSource::Store,
            }
        }
        Ok(_) => {
            tracing::warn!("no conditions found in the store, falling back to defaults");
            ResolvedCatalog::defaults(FallbackReason::Empty)
        }
        Err(e) => {
            tracing::warn!("failed to load conditions, falling back to defaults: {}", e);
            ResolvedCatalog::defaults(FallbackReason::LoadFailed(e.to_string()))
        }
    }
}

/// Loads from `provider` and applies the fallback policy.
pub async fn resolve_catalog<P: CatalogProvider>(provider: &P) -> ResolvedCatalog {
    resolve_loaded(provider.load_catalog().await)
}

/// Resolves the session catalog from the configured store.
///
/// Connection, migration and query failures all end in the built-in defaults; this never
/// fails.
pub async fn load_catalog(cfg: &CoreConfig) -> ResolvedCatalog {
    let Some(url) = cfg.database_url() else {
        tracing::info!("no condition store configured, using defaults");
        return ResolvedCatalog::defaults(FallbackReason::NotConfigured);
    };

    let repo = match ConditionRepository::connect(url, cfg.acquire_timeout()).await {
        Ok(repo) => repo,
        Err(e) => return resolve_loaded(Err(e)),
    };

    if cfg.run_migrations() {
        if let Err(e) = repo.migrate().await {
            return resolve_loaded(Err(e));
        }
    }

    resolve_catalog(&repo).await
}

/// Every symptom a checklist should offer: the baseline vocabulary first, then any
/// catalog symptom not already listed, in first-seen order.
pub fn all_symptom_names(catalog: &[Condition]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    let catalog_symptoms = catalog
        .iter()
        .flat_map(|c| c.symptoms().iter().map(String::as_str));

    for symptom in BASELINE_SYMPTOMS.iter().copied().chain(catalog_symptoms) {
        if seen.insert(symptom) {
            names.push(symptom.to_owned());
        }
    }

    names
}

fn builtin(name: &'static str, symptoms: &[&str], advice: &str) -> Condition {
    Condition::new(
        ConditionName::from_static(name),
        symptoms.iter().map(|s| (*s).to_owned()).collect(),
        advice,
    )
}

/// The fixed catalog used when the store yields nothing.
pub fn default_conditions() -> Vec<Condition> {
    vec![
        builtin(
            "Common Cold",
            &["Cough", "Runny Nose", "Sore Throat", "Sneezing"],
            "Rest, drink fluids, and consider warm soups.",
        ),
        builtin(
            "Flu",
            &["Fever", "Body Aches", "Fatigue", "Headache", "Chills"],
            "Rest well, stay hydrated, and monitor fever.",
        ),
        builtin(
            "Food Poisoning",
            &["Nausea", "Stomach Pain", "Dizziness"],
            "Hydrate with small sips; avoid heavy foods.",
        ),
        builtin(
            "Seasonal Allergies",
            &["Sneezing", "Runny Nose", "Cough"],
            "Stay indoors during high pollen; consider over-the-counter meds.",
        ),
        builtin(
            "Migraine",
            &["Headache", "Nausea", "Dizziness"],
            "Rest in a quiet dark room, hydrate, and consider pain relief.",
        ),
        builtin(
            "Respiratory Infection",
            &["Cough", "Chest Pain", "Shortness of Breath", "Fever"],
            "Rest, fluids, and see a doctor if symptoms worsen.",
        ),
    ]
}
