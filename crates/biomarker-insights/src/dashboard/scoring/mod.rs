mod bands;
mod config;
mod curve;

pub use bands::{EnergyGrade, NO_DATA_LABEL};
pub use config::ScoringConfig;
pub use curve::score_for_deviation;

use super::classifier::deviation;
use super::dedupe::dedupe_by_latest;
use super::domain::EnrichedResult;
use serde::Serialize;

/// Aggregate wellness score over the latest result per biomarker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyScoreResult {
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<EnergyGrade>,
    pub label: &'static str,
}

impl EnergyScoreResult {
    pub fn no_data() -> Self {
        Self {
            score: 0,
            grade: None,
            label: NO_DATA_LABEL,
        }
    }

    fn graded(score: u8) -> Self {
        let grade = EnergyGrade::from_score(score);
        Self {
            score,
            grade: Some(grade),
            label: grade.label(),
        }
    }
}

pub fn result_score(result: &EnrichedResult, config: &ScoringConfig) -> u8 {
    score_for_deviation(deviation(result, config), config)
}

/// Importance-weighted mean of per-result scores.
///
/// Input is deduplicated first, so repeated samples of one biomarker count once. Empty input
/// or a non-positive importance total yields the "No data" result.
pub fn compute_energy_score(
    results: &[EnrichedResult],
    config: &ScoringConfig,
) -> EnergyScoreResult {
    let latest = dedupe_by_latest(results);

    let mut weighted_sum = 0.0;
    let mut total_importance = 0.0;

    for result in &latest {
        let importance = result.biomarker.importance;
        weighted_sum += f64::from(result_score(result, config)) * importance;
        total_importance += importance;
    }

    if latest.is_empty() || total_importance <= 0.0 {
        return EnergyScoreResult::no_data();
    }

    let score = (weighted_sum / total_importance).round().clamp(0.0, 100.0) as u8;
    EnergyScoreResult::graded(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::domain::{Biomarker, LabResult, ReferenceRange};

    fn enriched(
        id: &str,
        biomarker_id: &str,
        value: f64,
        importance: f64,
        sampled_at: &str,
    ) -> EnrichedResult {
        let range = ReferenceRange {
            low: 100.0,
            high: 200.0,
        };
        EnrichedResult {
            result: LabResult {
                id: id.to_string(),
                biomarker_id: biomarker_id.to_string(),
                value,
                sampled_at: sampled_at.to_string(),
                status: range.implied_status(value),
            },
            biomarker: Biomarker {
                id: biomarker_id.to_string(),
                name: biomarker_id.to_string(),
                standard_unit: "mg/dL".to_string(),
                reference_range: range,
                category: "Lipids".to_string(),
                importance,
            },
        }
    }

    #[test]
    fn single_result_scores_follow_the_curve() {
        let config = ScoringConfig::default();
        let mid = enriched("r-1", "bio-1", 150.0, 8.0, "2024-01-01");
        let edge = enriched("r-2", "bio-1", 200.0, 8.0, "2024-01-01");
        let far = enriched("r-3", "bio-1", 250.0, 8.0, "2024-01-01");

        assert_eq!(result_score(&mid, &config), 100);
        assert_eq!(result_score(&edge, &config), 80);
        assert_eq!(result_score(&far, &config), 40);
    }

    #[test]
    fn aggregate_is_importance_weighted() {
        let config = ScoringConfig::default();
        let results = vec![
            enriched("r-1", "bio-1", 150.0, 3.0, "2024-01-01"),
            enriched("r-2", "bio-2", 250.0, 1.0, "2024-01-01"),
        ];

        // (100 * 3 + 40 * 1) / 4 = 85
        let outcome = compute_energy_score(&results, &config);
        assert_eq!(outcome.score, 85);
        assert_eq!(outcome.grade, Some(EnergyGrade::B));
        assert_eq!(outcome.label, "Good");
    }

    #[test]
    fn aggregate_only_counts_latest_sample_per_biomarker() {
        let config = ScoringConfig::default();
        let results = vec![
            enriched("old", "bio-1", 400.0, 5.0, "2023-06-01"),
            enriched("new", "bio-1", 150.0, 5.0, "2024-06-01"),
        ];

        let outcome = compute_energy_score(&results, &config);
        assert_eq!(outcome.score, 100);
        assert_eq!(outcome.grade, Some(EnergyGrade::A));
    }

    #[test]
    fn empty_input_reports_no_data() {
        let outcome = compute_energy_score(&[], &ScoringConfig::default());
        assert_eq!(outcome, EnergyScoreResult::no_data());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.label, "No data");
    }

    #[test]
    fn zero_total_importance_reports_no_data() {
        let results = vec![enriched("r-1", "bio-1", 150.0, 0.0, "2024-01-01")];
        let outcome = compute_energy_score(&results, &ScoringConfig::default());
        assert_eq!(outcome, EnergyScoreResult::no_data());
    }

    #[test]
    fn aggregate_stays_within_bounds() {
        let config = ScoringConfig::default();
        let values = [0.0, 95.0, 150.0, 199.0, 260.0, 1_000.0];
        for (index, value) in values.iter().enumerate() {
            let results: Vec<EnrichedResult> = values[..=index]
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let importance = (i + 1) as f64;
                    enriched(&format!("r-{i}"), &format!("bio-{i}"), *v, importance, "2024-01-01")
                })
                .collect();
            let outcome = compute_energy_score(&results, &config);
            assert!(outcome.score <= 100, "out of bounds after adding {value}");
            assert!(outcome.grade.is_some());
        }
    }
}
