use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info};

use super::models::{
    Acknowledgement, ExportResponse, HealthResponse, HistoryResponse, SaveScanRequest,
};
use super::AppState;
use crate::error::Error;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub(crate) async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// A body that is not a JSON object of the expected shape is reported as an
/// internal fault, same as a storage failure.
pub(crate) async fn save_scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Acknowledgement>, Error> {
    let Json(body) = payload.map_err(|rejection| Error::internal(rejection.body_text()))?;
    let request = SaveScanRequest::try_from(body)?;
    let (content, category) = request.into_parts();
    state.history().append(content, category)?;
    Ok(Json(Acknowledgement::ok("Scan saved")))
}

pub(crate) async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(state.history().list_recent(state.recent_limit()).into())
}

pub(crate) async fn clear_history_handler(State(state): State<AppState>) -> Json<Acknowledgement> {
    state.history().clear();
    info!("scan history cleared");
    Json(Acknowledgement::ok("History cleared"))
}

pub(crate) async fn export_history_handler(State(state): State<AppState>) -> Json<ExportResponse> {
    Json(state.history().export_all().into())
}
