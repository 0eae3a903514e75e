use super::super::classifier::ResultDisplay;
use super::super::domain::EnrichedResult;
use super::super::engine::InsightsEngine;
use super::super::insights::{CategorySummary, ResultStats};
use super::super::scoring::EnergyScoreResult;
use serde::Serialize;

/// List row: the enriched result plus everything a card or table cell renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    #[serde(flatten)]
    pub result: EnrichedResult,
    pub status_label: &'static str,
    pub display: ResultDisplay,
    pub score: u8,
}

impl ResultView {
    pub fn new(result: EnrichedResult, engine: &InsightsEngine) -> Self {
        let display = engine.classify(&result);
        let score = engine.result_score(&result);
        Self {
            status_label: result.status().label(),
            display,
            score,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityItemView {
    #[serde(flatten)]
    pub view: ResultView,
    pub priority_weight: f64,
    pub coaching_tip: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub energy_score: EnergyScoreResult,
    pub stats: ResultStats,
    pub priority_items: Vec<PriorityItemView>,
    pub categories: CategorySummary,
    pub report_date: String,
    pub results: Vec<ResultView>,
}

/// Drill-down payload for a single result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetail {
    #[serde(flatten)]
    pub view: ResultView,
    pub interpretation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching_tip: Option<&'static str>,
    pub note: String,
}
