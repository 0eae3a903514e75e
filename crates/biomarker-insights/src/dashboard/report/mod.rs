mod summary;
pub mod views;

pub(crate) use summary::build_report;
pub use views::{DashboardReport, PriorityItemView, ResultDetail, ResultView};
