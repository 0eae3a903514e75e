use super::domain::{join, Biomarker, EnrichedResult, LabResult};
use std::collections::BTreeSet;
use tracing::debug;

/// Joined snapshot of the two source collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    biomarkers: Vec<Biomarker>,
    results: Vec<EnrichedResult>,
    categories: Vec<String>,
}

impl Dataset {
    pub fn new(biomarkers: Vec<Biomarker>, results: &[LabResult]) -> Self {
        let enriched = join(&biomarkers, results);
        let dropped = results.len() - enriched.len();
        if dropped > 0 {
            debug!(dropped, "skipped results referencing unknown biomarkers");
        }

        let categories = biomarkers
            .iter()
            .map(|biomarker| biomarker.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            biomarkers,
            results: enriched,
            categories,
        }
    }

    pub fn biomarkers(&self) -> &[Biomarker] {
        &self.biomarkers
    }

    /// Every joined result, including superseded samples.
    pub fn results(&self) -> &[EnrichedResult] {
        &self.results
    }

    /// Distinct biomarker categories in ascending order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn find_result(&self, result_id: &str) -> Option<&EnrichedResult> {
        self.results.iter().find(|result| result.id() == result_id)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
