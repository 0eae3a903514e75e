use serde::{Deserialize, Serialize};

/// Tuning constants for deviation grading and the per-result reward curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Deviation strictly above this marks an out-of-range result as severe.
    pub severe_deviation_threshold: f64,
    /// Points lost per unit of deviation while inside the reference range.
    pub in_range_slope: f64,
    /// Points lost per unit of overshoot once outside the reference range.
    pub out_of_range_slope: f64,
    /// Deviation reported for a zero-span range when the value misses the midpoint.
    pub degenerate_range_deviation: f64,
    pub max_priority_items: usize,
}

impl ScoringConfig {
    /// Score awarded exactly at a range boundary, where both curve segments meet.
    pub fn boundary_score(&self) -> f64 {
        100.0 - self.in_range_slope
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            severe_deviation_threshold: 1.8,
            in_range_slope: 20.0,
            out_of_range_slope: 40.0,
            degenerate_range_deviation: 2.0,
            max_priority_items: 5,
        }
    }
}
