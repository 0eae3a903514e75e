use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredNoteStore};
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use biomarker_insights::config::AppConfig;
use biomarker_insights::dashboard::DashboardService;
use biomarker_insights::error::AppError;
use biomarker_insights::ingest::DatasetLoader;
use biomarker_insights::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let loaded =
        DatasetLoader::from_paths(&config.data.biomarkers_path, &config.data.results_path)?;
    if loaded.dataset.is_empty() {
        warn!("dataset has no results; dashboard will report no data");
    }

    let notes = ConfiguredNoteStore::from_path(config.data.notes_path.as_deref())?;
    info!(notes = %notes.describe(), "note store ready");

    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(loaded.dataset),
        Arc::new(notes),
        config.scoring.clone(),
    ));

    let app = with_dashboard_routes(dashboard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "biomarker dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
