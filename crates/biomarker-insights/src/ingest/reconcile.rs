use crate::dashboard::domain::{EnrichedResult, ResultStatus};
use crate::dashboard::Dataset;
use serde::Serialize;
use tracing::warn;

/// A result whose supplied status disagrees with its value and reference range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMismatch {
    pub result_id: String,
    pub biomarker_id: String,
    pub reported: ResultStatus,
    pub implied: ResultStatus,
}

pub fn status_mismatches(results: &[EnrichedResult]) -> Vec<StatusMismatch> {
    results
        .iter()
        .filter_map(|result| {
            let implied = result
                .biomarker
                .reference_range
                .implied_status(result.value());
            (implied != result.status()).then(|| StatusMismatch {
                result_id: result.id().to_string(),
                biomarker_id: result.biomarker_id().to_string(),
                reported: result.status(),
                implied,
            })
        })
        .collect()
}

/// Logs data-quality problems without altering the dataset; the supplied status stays
/// authoritative.
pub(crate) fn audit(dataset: &Dataset) -> Vec<StatusMismatch> {
    for biomarker in dataset.biomarkers() {
        if biomarker.reference_range.is_inverted() {
            warn!(
                biomarker = %biomarker.id,
                low = biomarker.reference_range.low,
                high = biomarker.reference_range.high,
                "reference range is inverted"
            );
        }
        if biomarker.importance <= 0.0 {
            warn!(
                biomarker = %biomarker.id,
                importance = biomarker.importance,
                "importance must be positive to carry weight"
            );
        }
    }

    let mismatches = status_mismatches(dataset.results());
    for mismatch in &mismatches {
        warn!(
            result = %mismatch.result_id,
            biomarker = %mismatch.biomarker_id,
            reported = %mismatch.reported,
            implied = %mismatch.implied,
            "reported status disagrees with reference range"
        );
    }
    mismatches
}
