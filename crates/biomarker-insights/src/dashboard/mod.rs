//! Biomarker result classification, scoring, ranking, and list views.

pub mod classifier;
mod dataset;
pub mod dedupe;
pub mod domain;
mod engine;
pub mod filters;
pub mod insights;
pub mod notes;
pub mod priority;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{ResultDisplay, Severity, StatusIcon};
pub use dataset::Dataset;
pub use dedupe::dedupe_by_latest;
pub use domain::{join, Biomarker, EnrichedResult, LabResult, ReferenceRange, ResultStatus};
pub use engine::InsightsEngine;
pub use filters::{
    filter_and_sort, CategoryFilter, ResultQuery, SortDirection, SortField, StatusFilter,
};
pub use notes::{NoteKey, NoteStore, NoteStoreError};
pub use priority::{prioritize, DEFAULT_MAX_PRIORITY_ITEMS};
pub use report::{DashboardReport, PriorityItemView, ResultDetail, ResultView};
pub use router::dashboard_router;
pub use scoring::{compute_energy_score, EnergyGrade, EnergyScoreResult, ScoringConfig};
pub use service::{DashboardService, DashboardServiceError};
