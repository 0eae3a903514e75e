use super::config::ScoringConfig;

/// Continuous reward for a single result: full marks at the midpoint, the boundary score at the
/// range edge, then a steeper falloff that bottoms out at zero.
pub fn score_for_deviation(deviation: f64, config: &ScoringConfig) -> u8 {
    let raw = if deviation <= 1.0 {
        100.0 - deviation * config.in_range_slope
    } else {
        let overshoot = deviation - 1.0;
        (config.boundary_score() - overshoot * config.out_of_range_slope).max(0.0)
    };

    raw.round().clamp(0.0, 100.0) as u8
}
