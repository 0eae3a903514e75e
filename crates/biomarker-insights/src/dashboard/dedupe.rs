use super::domain::{compare_sampled_at, EnrichedResult};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Collapses results to the latest sample per biomarker in a single pass.
///
/// Ties on `sampled_at` go to the result seen last. Entries come back in the order each
/// biomarker first appeared in the input.
pub fn dedupe_by_latest(results: &[EnrichedResult]) -> Vec<EnrichedResult> {
    let mut slots: HashMap<&str, usize> = HashMap::with_capacity(results.len());
    let mut latest: Vec<&EnrichedResult> = Vec::new();

    for result in results {
        match slots.get(result.biomarker_id()) {
            Some(&slot) => {
                let current = latest[slot];
                if compare_sampled_at(result.sampled_at(), current.sampled_at()) != Ordering::Less
                {
                    latest[slot] = result;
                }
            }
            None => {
                slots.insert(result.biomarker_id(), latest.len());
                latest.push(result);
            }
        }
    }

    latest.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::domain::{Biomarker, LabResult, ReferenceRange, ResultStatus};
    use std::collections::HashSet;

    fn sample(id: &str, biomarker_id: &str, sampled_at: &str) -> EnrichedResult {
        EnrichedResult {
            result: LabResult {
                id: id.to_string(),
                biomarker_id: biomarker_id.to_string(),
                value: 1.0,
                sampled_at: sampled_at.to_string(),
                status: ResultStatus::Normal,
            },
            biomarker: Biomarker {
                id: biomarker_id.to_string(),
                name: biomarker_id.to_uppercase(),
                standard_unit: "mg/dL".to_string(),
                reference_range: ReferenceRange {
                    low: 0.0,
                    high: 2.0,
                },
                category: "Lipids".to_string(),
                importance: 1.0,
            },
        }
    }

    fn ids(results: &[EnrichedResult]) -> Vec<&str> {
        results.iter().map(EnrichedResult::id).collect()
    }

    #[test]
    fn keeps_latest_sample_per_biomarker() {
        let input = vec![
            sample("a-old", "a", "2024-01-01"),
            sample("b-new", "b", "2024-03-01"),
            sample("a-new", "a", "2024-02-01"),
            sample("b-old", "b", "2023-12-31"),
        ];

        let deduped = dedupe_by_latest(&input);

        assert_eq!(ids(&deduped), vec!["a-new", "b-new"]);
    }

    #[test]
    fn equal_timestamps_resolve_to_last_seen() {
        let input = vec![
            sample("first", "a", "2024-01-01"),
            sample("second", "a", "2024-01-01"),
        ];

        assert_eq!(ids(&dedupe_by_latest(&input)), vec!["second"]);
    }

    #[test]
    fn dedupe_is_idempotent() {
        let input = vec![
            sample("a-1", "a", "2024-01-01"),
            sample("a-2", "a", "2024-05-01"),
            sample("c-1", "c", "2024-02-01"),
            sample("b-1", "b", "2024-04-01"),
            sample("b-2", "b", "2024-04-01"),
        ];

        let once = dedupe_by_latest(&input);
        let twice = dedupe_by_latest(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn output_holds_one_entry_per_biomarker_with_max_timestamp() {
        let input = vec![
            sample("x-1", "x", "2024-01-03"),
            sample("y-1", "y", "2024-01-01"),
            sample("x-2", "x", "2024-01-01T12:00:00Z"),
            sample("y-2", "y", "2024-01-02T08:30:00Z"),
            sample("x-3", "x", "2024-01-02"),
        ];

        let deduped = dedupe_by_latest(&input);
        let distinct: HashSet<&str> = deduped.iter().map(EnrichedResult::biomarker_id).collect();
        assert_eq!(distinct.len(), deduped.len());

        for kept in &deduped {
            assert!(input
                .iter()
                .filter(|other| other.biomarker_id() == kept.biomarker_id())
                .all(|other| compare_sampled_at(other.sampled_at(), kept.sampled_at())
                    != Ordering::Greater));
        }
        assert_eq!(ids(&deduped), vec!["x-1", "y-2"]);
    }

    #[test]
    fn winner_does_not_depend_on_input_order() {
        let forward = vec![
            sample("offset", "a", "2024-01-02T01:00:00+05:00"),
            sample("utc", "a", "2024-01-01T22:00:00Z"),
            sample("garbled", "a", "2024-01-01X"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let rotated = vec![forward[2].clone(), forward[0].clone(), forward[1].clone()];

        assert_eq!(ids(&dedupe_by_latest(&forward)), vec!["utc"]);
        assert_eq!(ids(&dedupe_by_latest(&reversed)), vec!["utc"]);
        assert_eq!(ids(&dedupe_by_latest(&rotated)), vec!["utc"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe_by_latest(&[]).is_empty());
    }
}
