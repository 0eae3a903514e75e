use super::classifier::{self, ResultDisplay, Severity};
use super::domain::EnrichedResult;
use super::priority;
use super::report::{self, DashboardReport, ResultView};
use super::scoring::{self, EnergyScoreResult, ScoringConfig};

/// Stateless evaluator applying one set of tuning constants to every computation.
#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    config: ScoringConfig,
}

impl InsightsEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn deviation(&self, result: &EnrichedResult) -> f64 {
        classifier::deviation(result, &self.config)
    }

    pub fn severity(&self, result: &EnrichedResult) -> Severity {
        classifier::severity(result, &self.config)
    }

    pub fn classify(&self, result: &EnrichedResult) -> ResultDisplay {
        classifier::classify(result, &self.config)
    }

    pub fn result_score(&self, result: &EnrichedResult) -> u8 {
        scoring::result_score(result, &self.config)
    }

    pub fn energy_score(&self, results: &[EnrichedResult]) -> EnergyScoreResult {
        scoring::compute_energy_score(results, &self.config)
    }

    /// Top out-of-range results capped at the configured item count.
    pub fn prioritize(&self, results: &[EnrichedResult]) -> Vec<EnrichedResult> {
        self.prioritize_top(results, self.config.max_priority_items)
    }

    pub fn prioritize_top(
        &self,
        results: &[EnrichedResult],
        max_items: usize,
    ) -> Vec<EnrichedResult> {
        priority::prioritize(results, max_items, &self.config)
    }

    pub fn view(&self, result: &EnrichedResult) -> ResultView {
        ResultView::new(result.clone(), self)
    }

    pub fn report(&self, results: &[EnrichedResult], categories: &[String]) -> DashboardReport {
        report::build_report(self, results, categories)
    }
}
