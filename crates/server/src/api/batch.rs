//! Batch validation API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};

use bookscout_core::{
    batch::{apply_all_suggestions, export_filename, to_csv},
    BatchFilter, BatchResult,
};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    /// Newline-separated queries; blank lines are skipped.
    pub input: String,
    #[serde(default)]
    pub filter: BatchFilter,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsRequest {
    pub results: Vec<BatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub results: Vec<BatchResult>,
    /// Apply only this row's suggestion; all pending rows when absent.
    #[serde(default)]
    pub index: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/batch
///
/// Validate a batch of queries against the catalog and, when live search
/// is enabled, gather market stats per query. Results come back in input
/// order.
pub async fn run(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchRequest>,
) -> Json<BatchResponse> {
    let results = state.batch().run(&body.input, &body.filter).await;
    Json(BatchResponse { results })
}

/// POST /api/v1/batch/apply
///
/// Accept catalog suggestions in a result set, either one row by index
/// or all of them. Idempotent; rows without a suggestion are returned
/// unchanged, and an out-of-range index applies nothing.
pub async fn apply(Json(body): Json<ApplyRequest>) -> Json<BatchResponse> {
    let mut results = body.results;
    match body.index {
        Some(index) => {
            if let Some(result) = results.get_mut(index) {
                result.apply_suggestion();
            }
        }
        None => apply_all_suggestions(&mut results),
    }
    Json(BatchResponse { results })
}

/// POST /api/v1/batch/export
///
/// Render a result set as CSV, served as a dated file download.
pub async fn export(Json(body): Json<ResultsRequest>) -> (HeaderMap, String) {
    let csv = to_csv(&body.results);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", export_filename());
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    (headers, csv)
}
