//! Symptom matching and ranking.
//!
//! Given the user's selected symptoms and a loaded catalog, every condition with at least
//! one symptom is scored by how many distinct selected symptoms it lists. Conditions with
//! [`PRIMARY_MATCH_THRESHOLD`] or more matches form the primary result; when none qualify
//! the closest conditions (at least [`FALLBACK_MATCH_THRESHOLD`] match) are returned
//! instead. Either way at most [`MAX_RESULTS`] conditions come back, ordered by matched
//! count, then percentage, then name.
//!
//! Everything here is pure: the catalog is only read and identical inputs always produce
//! identical output.

use crate::condition::Condition;
use crate::constants::{FALLBACK_MATCH_THRESHOLD, MAX_RESULTS, PRIMARY_MATCH_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// How well one condition matched a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub condition_name: String,
    pub matched_count: usize,
    pub total_symptoms: usize,
    pub percent_match: u32,
    pub advice: String,
}

/// Which branch of the ranking produced a [`MatchReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// At least one condition reached the primary threshold.
    Primary,
    /// Nothing reached the primary threshold; these are the closest conditions.
    Fallback,
    /// The selection matched no condition at all.
    NoMatch,
    /// Nothing was selected.
    EmptySelection,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Primary => "primary",
            MatchTier::Fallback => "fallback",
            MatchTier::NoMatch => "no_match",
            MatchTier::EmptySelection => "empty_selection",
        }
    }
}

/// Ranked results together with the tier that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub tier: MatchTier,
    pub results: Vec<MatchResult>,
}

/// Rounds `matched * 100 / total` half-up using integer arithmetic only.
///
/// `total` must be non-zero.
pub fn percent_match(matched: usize, total: usize) -> u32 {
    debug_assert!(total > 0);
    let rounded = (matched * 200 + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Returns at most three conditions ranked against `selected`.
///
/// An empty selection yields an empty list. See [`check_symptoms_report`] for the tier
/// that produced the list.
pub fn check_symptoms<S: AsRef<str>>(selected: &[S], catalog: &[Condition]) -> Vec<MatchResult> {
    check_symptoms_report(selected, catalog).results
}

/// Scores, filters and ranks `catalog` against `selected`.
pub fn check_symptoms_report<S: AsRef<str>>(selected: &[S], catalog: &[Condition]) -> MatchReport {
    let distinct = distinct_selection(selected);
    if distinct.is_empty() {
        return MatchReport {
            tier: MatchTier::EmptySelection,
            results: Vec::new(),
        };
    }

    let scored = score_catalog(&distinct, catalog);

    let primary = top_ranked(&scored, PRIMARY_MATCH_THRESHOLD);
    if !primary.is_empty() {
        return MatchReport {
            tier: MatchTier::Primary,
            results: primary,
        };
    }

    let fallback = top_ranked(&scored, FALLBACK_MATCH_THRESHOLD);
    let tier = if fallback.is_empty() {
        MatchTier::NoMatch
    } else {
        MatchTier::Fallback
    };
    tracing::debug!(
        selected = distinct.len(),
        returned = fallback.len(),
        tier = tier.as_str(),
        "no condition reached the primary threshold"
    );

    MatchReport {
        tier,
        results: fallback,
    }
}

/// Selection order is irrelevant to scoring; duplicates count once.
fn distinct_selection<S: AsRef<str>>(selected: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    selected
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| seen.insert(*s))
        .collect()
}

fn score_catalog(selected: &[&str], catalog: &[Condition]) -> Vec<MatchResult> {
    catalog
        .iter()
        .filter(|condition| !condition.symptoms().is_empty())
        .map(|condition| {
            let total = condition.symptoms().len();
            let matched = selected
                .iter()
                .filter(|symptom| condition.has_symptom(symptom))
                .count();

            MatchResult {
                condition_name: condition.name().to_string(),
                matched_count: matched,
                total_symptoms: total,
                percent_match: percent_match(matched, total),
                advice: condition.advice().to_owned(),
            }
        })
        .collect()
}

fn top_ranked(scored: &[MatchResult], min_matched: usize) -> Vec<MatchResult> {
    let mut kept: Vec<MatchResult> = scored
        .iter()
        .filter(|r| r.matched_count >= min_matched)
        .cloned()
        .collect();
    kept.sort_by(rank_order);
    kept.truncate(MAX_RESULTS);
    kept
}

/// Matched count desc, then percentage desc, then name asc.
fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.matched_count
        .cmp(&a.matched_count)
        .then_with(|| b.percent_match.cmp(&a.percent_match))
        .then_with(|| a.condition_name.cmp(&b.condition_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_conditions;

    fn condition(name: &str, symptoms: &[&str]) -> Condition {
        Condition::try_new(
            name,
            symptoms.iter().map(|s| s.to_string()).collect(),
            format!("advice for {name}"),
        )
        .expect("valid condition")
    }

    fn names(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.condition_name.as_str()).collect()
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_match(3, 5), 60);
        assert_eq!(percent_match(1, 3), 33);
        assert_eq!(percent_match(2, 3), 67);
        assert_eq!(percent_match(1, 8), 13);
        assert_eq!(percent_match(1, 200), 1);
        assert_eq!(percent_match(0, 4), 0);
        assert_eq!(percent_match(4, 4), 100);
    }

    #[test]
    fn flu_ranks_first_for_flu_like_selection() {
        let catalog = default_conditions();
        let report = check_symptoms_report(
            &["Fever", "Cough", "Headache", "Body Aches"],
            &catalog,
        );

        assert_eq!(report.tier, MatchTier::Primary);
        assert_eq!(
            report.results,
            vec![MatchResult {
                condition_name: "Flu".into(),
                matched_count: 3,
                total_symptoms: 5,
                percent_match: 60,
                advice: "Rest well, stay hydrated, and monitor fever.".into(),
            }]
        );
        assert!(!names(&report.results).contains(&"Respiratory Infection"));
    }

    #[test]
    fn single_symptom_uses_fallback_ranked_by_percent() {
        let catalog = default_conditions();
        let report = check_symptoms_report(&["Sneezing"], &catalog);

        assert_eq!(report.tier, MatchTier::Fallback);
        assert_eq!(names(&report.results), vec!["Seasonal Allergies", "Common Cold"]);
        assert_eq!(report.results[0].percent_match, 33);
        assert_eq!(report.results[1].percent_match, 25);
        assert!(report.results.iter().all(|r| r.matched_count == 1));
    }

    #[test]
    fn empty_selection_returns_nothing() {
        let catalog = default_conditions();
        let none: [&str; 0] = [];
        let report = check_symptoms_report(&none, &catalog);

        assert_eq!(report.tier, MatchTier::EmptySelection);
        assert!(report.results.is_empty());
        assert!(check_symptoms(&none, &catalog).is_empty());
    }

    #[test]
    fn unknown_symptom_matches_nothing() {
        let catalog = default_conditions();
        let report = check_symptoms_report(&["Hiccups"], &catalog);

        assert_eq!(report.tier, MatchTier::NoMatch);
        assert!(report.results.is_empty());
    }

    #[test]
    fn condition_without_symptoms_never_appears() {
        let mut catalog = default_conditions();
        catalog.push(condition("Mystery", &[]));

        let everything: Vec<String> = crate::constants::BASELINE_SYMPTOMS
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = check_symptoms(&everything, &catalog);

        assert!(!results.is_empty());
        assert!(!names(&results).contains(&"Mystery"));
    }

    #[test]
    fn ties_are_broken_by_name() {
        let catalog = vec![
            condition("Zeta", &["A", "B", "C", "D", "E"]),
            condition("Alpha", &["A", "B", "C", "X", "Y"]),
        ];
        let results = check_symptoms(&["A", "B", "C"], &catalog);

        assert_eq!(names(&results), vec!["Alpha", "Zeta"]);
        assert!(results.iter().all(|r| r.percent_match == 60));
    }

    #[test]
    fn name_tie_break_is_ordinal() {
        let catalog = vec![
            condition("alpha", &["A", "B", "C"]),
            condition("Beta", &["A", "B", "C"]),
        ];
        let results = check_symptoms(&["A", "B", "C"], &catalog);

        assert_eq!(names(&results), vec!["Beta", "alpha"]);
    }

    #[test]
    fn matched_count_outranks_percent() {
        let catalog = vec![
            condition("Small", &["A", "B", "C"]),
            condition("Large", &["A", "B", "C", "D", "E", "F", "G", "H"]),
        ];
        let results = check_symptoms(&["A", "B", "C", "D"], &catalog);

        assert_eq!(names(&results), vec!["Large", "Small"]);
        assert_eq!(results[0].matched_count, 4);
        assert_eq!(results[0].percent_match, 50);
        assert_eq!(results[1].percent_match, 100);
    }

    #[test]
    fn at_most_three_results() {
        let catalog: Vec<Condition> = ["D", "C", "B", "A", "E"]
            .iter()
            .map(|name| condition(name, &["X", "Y", "Z"]))
            .collect();
        let results = check_symptoms(&["X", "Y", "Z"], &catalog);

        assert_eq!(names(&results), vec!["A", "B", "C"]);
    }

    #[test]
    fn primary_result_excludes_fallback_candidates() {
        let catalog = vec![
            condition("Strong", &["A", "B", "C"]),
            condition("Weak", &["A"]),
        ];
        let report = check_symptoms_report(&["A", "B", "C"], &catalog);

        assert_eq!(report.tier, MatchTier::Primary);
        assert_eq!(names(&report.results), vec!["Strong"]);
    }

    #[test]
    fn duplicate_selection_counts_once() {
        let catalog = vec![condition("Cold", &["Cough", "Sneezing", "Runny Nose"])];
        let results = check_symptoms(&["Cough", "Cough", "Cough"], &catalog);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_count, 1);
        assert_eq!(results[0].percent_match, 33);
    }

    #[test]
    fn duplicate_condition_symptoms_only_inflate_total() {
        let catalog = vec![condition("Echo", &["Cough", "Cough", "Fever", "Chills"])];
        let results = check_symptoms(&["Cough", "Fever", "Chills"], &catalog);

        assert_eq!(results[0].matched_count, 3);
        assert_eq!(results[0].total_symptoms, 4);
        assert_eq!(results[0].percent_match, 75);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let catalog = default_conditions();
        assert!(check_symptoms(&["fever", "headache", "chills"], &catalog).is_empty());
    }

    #[test]
    fn repeated_checks_are_identical() {
        let catalog = default_conditions();
        let selection = ["Nausea", "Dizziness", "Headache", "Cough"];

        let first = check_symptoms_report(&selection, &catalog);
        let second = check_symptoms_report(&selection, &catalog);

        assert_eq!(first, second);
        assert_eq!(names(&first.results), vec!["Migraine"]);
        assert_eq!(catalog, default_conditions());
    }

    #[test]
    fn results_respect_ordering_and_thresholds_for_every_single_and_pair_selection() {
        let catalog = default_conditions();
        let vocab = crate::constants::BASELINE_SYMPTOMS;

        for (i, a) in vocab.iter().enumerate() {
            for b in &vocab[i..] {
                let report = check_symptoms_report(&[*a, *b], &catalog);
                assert!(report.results.len() <= MAX_RESULTS);
                let min = match report.tier {
                    MatchTier::Primary => PRIMARY_MATCH_THRESHOLD,
                    _ => FALLBACK_MATCH_THRESHOLD,
                };
                for r in &report.results {
                    assert!(r.matched_count >= min);
                    assert!(r.matched_count <= r.total_symptoms);
                    assert_eq!(r.percent_match, percent_match(r.matched_count, r.total_symptoms));
                }
                for pair in report.results.windows(2) {
                    assert_ne!(rank_order(&pair[0], &pair[1]), Ordering::Greater);
                }
            }
        }
    }
}
