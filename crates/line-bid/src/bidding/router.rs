use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{AllocationResult, AllocationSummary};
use super::export::{csv_content_type, results_to_csv, EXPORT_FILE_NAME};
use super::layout::BidLayout;
use super::process_bid_text;
use crate::config::BiddingConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessBidsRequest {
    #[serde(default)]
    pub bid_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessBidsResponse {
    pub layout: BidLayout,
    pub results: Vec<AllocationResult>,
    pub summary: AllocationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResultsRequest {
    #[serde(default)]
    pub results: Vec<AllocationResult>,
}

/// Router exposing bid processing and CSV export.
pub fn bid_router(config: BiddingConfig) -> Router {
    Router::new()
        .route("/api/v1/bids/process", post(process_handler))
        .route("/api/v1/bids/export", post(export_handler))
        .with_state(Arc::new(config))
}

pub(crate) async fn process_handler(
    State(config): State<Arc<BiddingConfig>>,
    Json(request): Json<ProcessBidsRequest>,
) -> Response {
    let size = request.bid_data.len();
    if size > config.max_input_bytes {
        warn!(size, limit = config.max_input_bytes, "bid text over limit");
        let payload = json!({
            "error": format!(
                "bid data is {size} bytes; the limit is {} bytes",
                config.max_input_bytes
            ),
        });
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(payload)).into_response();
    }

    match process_bid_text(&request.bid_data) {
        Ok(run) => {
            let body = ProcessBidsResponse {
                layout: run.layout,
                results: run.results,
                summary: run.summary,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected bid batch");
            let payload = json!({
                "error": error.to_string(),
                "kind": error.kind(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_handler(
    Json(request): Json<ExportResultsRequest>,
) -> Result<Response, AppError> {
    let body = results_to_csv(&request.results)?;
    let content_type = csv_content_type();
    let disposition = format!("attachment; filename={EXPORT_FILE_NAME}");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.as_ref()),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        body,
    )
        .into_response())
}
