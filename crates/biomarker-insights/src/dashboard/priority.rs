use super::classifier::deviation;
use super::dedupe::dedupe_by_latest;
use super::domain::EnrichedResult;
use super::scoring::ScoringConfig;

pub const DEFAULT_MAX_PRIORITY_ITEMS: usize = 5;

/// Ranking key rewarding results that are both clinically weighty and far from range.
pub fn priority_weight(result: &EnrichedResult, config: &ScoringConfig) -> f64 {
    result.biomarker.importance * deviation(result, config)
}

/// Latest out-of-range results ranked by `importance * deviation`, highest first.
///
/// Equal weights keep their input order.
pub fn prioritize(
    results: &[EnrichedResult],
    max_items: usize,
    config: &ScoringConfig,
) -> Vec<EnrichedResult> {
    let mut ranked: Vec<(f64, EnrichedResult)> = dedupe_by_latest(results)
        .into_iter()
        .filter(EnrichedResult::is_out_of_range)
        .map(|result| (priority_weight(&result, config), result))
        .collect();

    ranked.sort_by(|(left, _), (right, _)| right.total_cmp(left));
    ranked.truncate(max_items);

    ranked.into_iter().map(|(_, result)| result).collect()
}
