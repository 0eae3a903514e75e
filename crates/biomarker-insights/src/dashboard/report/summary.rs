use super::super::dedupe::dedupe_by_latest;
use super::super::domain::EnrichedResult;
use super::super::engine::InsightsEngine;
use super::super::filters::{filter_and_sort, SortDirection, SortField, StatusFilter};
use super::super::insights::{category_summary, coaching_tip, report_date, result_stats};
use super::super::priority::priority_weight;
use super::views::{DashboardReport, PriorityItemView, ResultView};

pub(crate) fn build_report(
    engine: &InsightsEngine,
    results: &[EnrichedResult],
    categories: &[String],
) -> DashboardReport {
    let latest = dedupe_by_latest(results);

    let priority_items = engine
        .prioritize(&latest)
        .into_iter()
        .map(|result| PriorityItemView {
            priority_weight: priority_weight(&result, engine.config()),
            coaching_tip: coaching_tip(&result),
            view: ResultView::new(result, engine),
        })
        .collect();

    let rows = filter_and_sort(
        &latest,
        None,
        StatusFilter::All,
        SortField::Name,
        SortDirection::Asc,
    )
    .into_iter()
    .map(|result| ResultView::new(result, engine))
    .collect();

    DashboardReport {
        energy_score: engine.energy_score(&latest),
        stats: result_stats(&latest),
        priority_items,
        categories: category_summary(categories, &latest),
        report_date: report_date(&latest),
        results: rows,
    }
}
