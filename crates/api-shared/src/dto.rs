//! Request and response bodies shared by the API surfaces.
//!
//! These mirror the core types but are owned, flat, and carry OpenAPI schemas so the core
//! crate stays free of API concerns.

use serde::{Deserialize, Serialize};
use symptom_core::{Condition, MatchReport, MatchResult, MatchTier};
use utoipa::ToSchema;

/// Shown when a check is submitted with nothing selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one symptom";

/// Shown when a selection matches no condition at all.
pub const NO_MATCH_MESSAGE: &str =
    "No strong matches found. Try selecting more symptoms or consult a medical professional.";

/// User-facing message for tiers that have no results to show.
pub fn tier_message(tier: MatchTier) -> Option<&'static str> {
    match tier {
        MatchTier::EmptySelection => Some(EMPTY_SELECTION_MESSAGE),
        MatchTier::NoMatch => Some(NO_MATCH_MESSAGE),
        MatchTier::Primary | MatchTier::Fallback => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListSymptomsRes {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionDto {
    pub name: String,
    pub symptoms: Vec<String>,
    pub advice: String,
}

impl From<&Condition> for ConditionDto {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name().to_string(),
            symptoms: condition.symptoms().to_vec(),
            advice: condition.advice().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListConditionsRes {
    /// Where the catalog came from, e.g. "condition store".
    pub source: String,
    pub conditions: Vec<ConditionDto>,
}

/// Body of `POST /check`. A missing `symptoms` field is an empty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckSymptomsReq {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchResultDto {
    pub condition_name: String,
    pub matched_count: usize,
    pub total_symptoms: usize,
    pub percent_match: u32,
    pub advice: String,
}

impl From<MatchResult> for MatchResultDto {
    fn from(result: MatchResult) -> Self {
        Self {
            condition_name: result.condition_name,
            matched_count: result.matched_count,
            total_symptoms: result.total_symptoms,
            percent_match: result.percent_match,
            advice: result.advice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckSymptomsRes {
    /// One of `primary`, `fallback`, `no_match`, `empty_selection`.
    pub tier: String,
    pub results: Vec<MatchResultDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<MatchReport> for CheckSymptomsRes {
    fn from(report: MatchReport) -> Self {
        Self {
            tier: report.tier.as_str().to_owned(),
            message: tier_message(report.tier).map(str::to_owned),
            results: report.results.into_iter().map(Into::into).collect(),
        }
    }
}
