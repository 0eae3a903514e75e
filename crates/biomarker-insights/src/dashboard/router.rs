use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::filters::ResultQuery;
use super::notes::NoteStore;
use super::service::{DashboardService, DashboardServiceError};

/// Router builder exposing the dashboard read endpoints and note editing.
pub fn dashboard_router<N>(service: Arc<DashboardService<N>>) -> Router
where
    N: NoteStore + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(report_handler::<N>))
        .route("/api/v1/categories", get(categories_handler::<N>))
        .route("/api/v1/results", get(results_handler::<N>))
        .route("/api/v1/results/:result_id", get(detail_handler::<N>))
        .route(
            "/api/v1/results/:result_id/note",
            get(note_handler::<N>).put(save_note_handler::<N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NotePayload {
    pub(crate) text: String,
}

pub(crate) async fn report_handler<N>(State(service): State<Arc<DashboardService<N>>>) -> Response
where
    N: NoteStore + 'static,
{
    (StatusCode::OK, Json(service.report())).into_response()
}

pub(crate) async fn categories_handler<N>(
    State(service): State<Arc<DashboardService<N>>>,
) -> Response
where
    N: NoteStore + 'static,
{
    let payload = json!({ "categories": service.categories() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn results_handler<N>(
    State(service): State<Arc<DashboardService<N>>>,
    Query(query): Query<ResultQuery>,
) -> Response
where
    N: NoteStore + 'static,
{
    let results = service.results(&query);
    let payload = json!({
        "query": query,
        "count": results.len(),
        "results": results,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn detail_handler<N>(
    State(service): State<Arc<DashboardService<N>>>,
    Path(result_id): Path<String>,
) -> Response
where
    N: NoteStore + 'static,
{
    match service.detail(&result_id) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn note_handler<N>(
    State(service): State<Arc<DashboardService<N>>>,
    Path(result_id): Path<String>,
) -> Response
where
    N: NoteStore + 'static,
{
    match service.note(&result_id) {
        Ok(text) => {
            let payload = json!({ "resultId": result_id, "text": text });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_note_handler<N>(
    State(service): State<Arc<DashboardService<N>>>,
    Path(result_id): Path<String>,
    Json(payload): Json<NotePayload>,
) -> Response
where
    N: NoteStore + 'static,
{
    match service.save_note(&result_id, &payload.text) {
        Ok(text) => {
            let payload = json!({ "resultId": result_id, "text": text });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: DashboardServiceError) -> Response {
    let status = match error {
        DashboardServiceError::ResultNotFound(_) => StatusCode::NOT_FOUND,
        DashboardServiceError::Notes(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
