use crate::infra::InMemoryNoteStore;
use biomarker_insights::config::AppConfig;
use biomarker_insights::dashboard::{
    CategoryFilter, DashboardReport, DashboardService, ResultQuery, ResultView, SortDirection,
    SortField, StatusFilter,
};
use biomarker_insights::error::AppError;
use biomarker_insights::ingest::{DatasetLoader, StatusMismatch};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Biomarker catalogue JSON (defaults to BIOMARKERS_PATH)
    #[arg(long)]
    pub(crate) biomarkers: Option<PathBuf>,
    /// Lab results JSON (defaults to RESULTS_PATH)
    #[arg(long)]
    pub(crate) results: Option<PathBuf>,
    /// Category to list: all, attention, or a category name
    #[arg(long, default_value = "all")]
    pub(crate) category: CategoryFilter,
    /// Status to list: all, low, normal, or high
    #[arg(long, default_value = "all")]
    pub(crate) status: StatusFilter,
    /// Sort key for the result listing: name, value, status, or sampledAt
    #[arg(long, default_value = "name")]
    pub(crate) sort: SortField,
    /// Sort direction for the result listing: asc or desc
    #[arg(long, default_value = "asc")]
    pub(crate) direction: SortDirection,
    /// Include the filtered result listing in the output
    #[arg(long)]
    pub(crate) list_results: bool,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ReportArgs {
    fn query(&self) -> ResultQuery {
        ResultQuery {
            category: self.category.clone(),
            status: self.status,
            sort: self.sort,
            direction: self.direction,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportOutput {
    pub(crate) report: DashboardReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) results: Option<Vec<ResultView>>,
    pub(crate) status_mismatches: Vec<StatusMismatch>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let biomarkers = args
        .biomarkers
        .clone()
        .unwrap_or(config.data.biomarkers_path);
    let results = args.results.clone().unwrap_or(config.data.results_path);

    let loaded = DatasetLoader::from_paths(&biomarkers, &results)?;
    let service = DashboardService::new(
        Arc::new(loaded.dataset),
        Arc::new(InMemoryNoteStore::default()),
        config.scoring,
    );

    let output = ReportOutput {
        report: service.report(),
        results: args.list_results.then(|| service.results(&args.query())),
        status_mismatches: loaded.mismatches,
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{}", render_report(&output, &args.query()));
    }

    Ok(())
}

pub(crate) fn render_report(output: &ReportOutput, query: &ResultQuery) -> String {
    let report = &output.report;
    let mut lines = Vec::new();

    lines.push("Biomarker dashboard".to_string());
    if !report.report_date.is_empty() {
        lines.push(format!("Report date: {}", report.report_date));
    }

    let score = &report.energy_score;
    match score.grade {
        Some(grade) => lines.push(format!(
            "Energy score: {} ({:?}, {})",
            score.score, grade, score.label
        )),
        None => lines.push(format!("Energy score: {} ({})", score.score, score.label)),
    }
    lines.push(format!(
        "{} in range | {} to improve",
        report.stats.in_range, report.stats.improvable
    ));

    if report.priority_items.is_empty() {
        lines.push("\nPriority focus: none".to_string());
    } else {
        lines.push("\nPriority focus".to_string());
        for (rank, item) in report.priority_items.iter().enumerate() {
            let view = &item.view;
            lines.push(format!(
                "{}. {} {} {} [{}] {}",
                rank + 1,
                view.result.biomarker.name,
                view.result.value(),
                view.result.biomarker.standard_unit,
                view.display.label,
                item.coaching_tip
            ));
        }
    }

    lines.push("\nCategories".to_string());
    for count in &report.categories.categories {
        let attention = if count.attention > 0 {
            format!(", {} need attention", count.attention)
        } else {
            String::new()
        };
        lines.push(format!(
            "- {} {}: {} results{}",
            count.icon, count.category, count.total, attention
        ));
    }

    if let Some(results) = &output.results {
        lines.push(format!(
            "\nResults (category {}, status {}, sort {:?} {:?})",
            query.category, query.status, query.sort, query.direction
        ));
        if results.is_empty() {
            lines.push("- no matching results".to_string());
        }
        for view in results {
            lines.push(format!(
                "- {} ({}): {} {} {} | score {} | sampled {}",
                view.result.biomarker.name,
                view.result.biomarker.category,
                view.result.value(),
                view.result.biomarker.standard_unit,
                view.status_label,
                view.score,
                view.result.sampled_at()
            ));
        }
    }

    if !output.status_mismatches.is_empty() {
        lines.push("\nData quality".to_string());
        for mismatch in &output.status_mismatches {
            lines.push(format!(
                "- result {} reported {} but range implies {}",
                mismatch.result_id, mismatch.reported, mismatch.implied
            ));
        }
    }

    lines.join("\n")
}
