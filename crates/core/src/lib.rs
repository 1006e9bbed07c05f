//! # Symptom Core
//!
//! Core business logic for the symptom checker.
//!
//! This crate contains the pure matching logic and the catalog it runs against:
//! - Ranking conditions against a symptom selection (`matcher`)
//! - Resolving the session catalog from the condition store or the built-in defaults
//!   (`catalog`, `repository`)
//! - Startup configuration (`config`)
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest`,
//! `api-shared` and `symptom-cli`.

pub mod catalog;
pub mod condition;
pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod repository;

pub use catalog::{
    all_symptom_names, default_conditions, load_catalog, resolve_catalog, CatalogProvider,
    CatalogSource, FallbackReason, ResolvedCatalog,
};
pub use condition::{Condition, ConditionName, ConditionNameError};
pub use config::CoreConfig;
pub use error::{CatalogError, CatalogResult};
pub use matcher::{check_symptoms, check_symptoms_report, MatchReport, MatchResult, MatchTier};
pub use repository::ConditionRepository;

use std::sync::Arc;

#[derive(Debug)]
struct SessionCatalog {
    conditions: Vec<Condition>,
    source: CatalogSource,
    symptoms: Vec<String>,
}

/// Symptom checking over one resolved catalog.
///
/// The catalog is read-only for the lifetime of the service, so clones share it and any
/// number of handlers can check symptoms without synchronisation.
#[derive(Clone, Debug)]
pub struct SymptomCheckerService {
    catalog: Arc<SessionCatalog>,
}

impl SymptomCheckerService {
    /// Creates a service over an already resolved catalog.
    ///
    /// The checklist of symptom names is computed once here.
    pub fn new(resolved: ResolvedCatalog) -> Self {
        let (conditions, source) = resolved.into_parts();
        let symptoms = all_symptom_names(&conditions);

        Self {
            catalog: Arc::new(SessionCatalog {
                conditions,
                source,
                symptoms,
            }),
        }
    }

    /// A service over the built-in catalog, as if no store were configured.
    pub fn with_defaults() -> Self {
        Self::new(ResolvedCatalog::defaults(FallbackReason::NotConfigured))
    }

    /// Resolves the catalog described by `cfg` and wraps it in a service.
    pub async fn bootstrap(cfg: &CoreConfig) -> Self {
        Self::new(load_catalog(cfg).await)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.catalog.conditions
    }

    pub fn source(&self) -> &CatalogSource {
        &self.catalog.source
    }

    /// Checklist order: baseline vocabulary, then unseen catalog symptoms.
    pub fn all_symptoms(&self) -> &[String] {
        &self.catalog.symptoms
    }

    /// Returns up to three ranked conditions for `selected`.
    pub fn check_symptoms<S: AsRef<str>>(&self, selected: &[S]) -> Vec<MatchResult> {
        check_symptoms(selected, &self.catalog.conditions)
    }

    /// Like [`Self::check_symptoms`], also reporting which tier produced the results.
    pub fn check<S: AsRef<str>>(&self, selected: &[S]) -> MatchReport {
        check_symptoms_report(selected, &self.catalog.conditions)
    }
}

impl Default for SymptomCheckerService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_uses_builtin_catalog() {
        let service = SymptomCheckerService::default();

        assert_eq!(service.conditions().len(), 6);
        assert_eq!(
            service.source(),
            &CatalogSource::Defaults(FallbackReason::NotConfigured)
        );
        assert_eq!(service.all_symptoms().len(), constants::BASELINE_SYMPTOMS.len());
    }

    #[test]
    fn clones_share_the_catalog() {
        let service = SymptomCheckerService::default();
        let clone = service.clone();

        assert!(Arc::ptr_eq(&service.catalog, &clone.catalog));
    }

    #[test]
    fn service_check_matches_free_function() {
        let service = SymptomCheckerService::default();
        let selection = vec!["Headache".to_string(), "Nausea".into(), "Dizziness".into()];

        let report = service.check(&selection);
        assert_eq!(report.tier, MatchTier::Primary);
        assert_eq!(report.results[0].condition_name, "Migraine");
        assert_eq!(report.results[0].percent_match, 100);
        assert_eq!(
            service.check_symptoms(&selection),
            check_symptoms(&selection, &default_conditions())
        );
    }

    #[test]
    fn custom_catalog_extends_checklist() {
        let resolved = resolve_catalog_for_test(vec![Condition::try_new(
            "Gout",
            vec!["Joint Pain".into(), "Fever".into()],
            "Elevate the joint.",
        )
        .expect("valid condition")]);
        let service = SymptomCheckerService::new(resolved);

        assert_eq!(service.source(), &CatalogSource::Store);
        assert_eq!(service.all_symptoms().last().map(String::as_str), Some("Joint Pain"));
    }

    fn resolve_catalog_for_test(conditions: Vec<Condition>) -> ResolvedCatalog {
        catalog::resolve_loaded(Ok(conditions))
    }
}
