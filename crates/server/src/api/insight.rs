//! AI insight API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use bookscout_core::{
    insight::{apply_draft, parse_draft, report_prompt, ListingDraft, EXTRACT_PROMPT},
    metrics::INSIGHT_REPORTS,
    InsightError, Listing,
};

use crate::state::AppState;

/// Text returned when no insight provider is configured.
const UNAVAILABLE: &str = "AI Insights unavailable.";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub provider: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Free-form pasted text (dealer email, auction description).
    #[serde(default)]
    pub text: Option<String>,
    /// Base64 photo, with or without a data-URL prefix.
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Listing to merge extracted fields into; a blank manual entry
    /// when absent.
    #[serde(default)]
    pub listing: Option<Listing>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub draft: ListingDraft,
    pub listing: Listing,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn insight_error(e: InsightError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match e {
        InsightError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/insight/report
///
/// Generate a collector-oriented report for a book. An unconfigured
/// provider is not an error: the response carries a fixed fallback text
/// so clients can render it directly.
pub async fn report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, impl IntoResponse> {
    let client = match state.insight() {
        Some(c) => c,
        None => {
            return Ok(Json(ReportResponse {
                provider: "none".to_string(),
                text: UNAVAILABLE.to_string(),
            }))
        }
    };

    let prompt = report_prompt(&body.title, &body.author);
    match client.generate(&prompt, None).await {
        Ok(text) => {
            INSIGHT_REPORTS.inc();
            Ok(Json(ReportResponse {
                provider: client.provider().to_string(),
                text,
            }))
        }
        Err(e) => Err(insight_error(e)),
    }
}

/// POST /api/v1/insight/extract
///
/// Extract listing fields from pasted text and/or a photo and merge them
/// into a listing draft. Prices must be positive to take effect; an
/// unparseable model response is a 422.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, impl IntoResponse> {
    let client = match state.insight() {
        Some(c) => c,
        None => return Err(insight_error(InsightError::NotConfigured)),
    };

    let mut prompt = EXTRACT_PROMPT.to_string();
    if let Some(text) = body.text.as_deref() {
        if !text.trim().is_empty() {
            prompt.push_str("\n\nText:\n");
            prompt.push_str(text);
        }
    }

    let raw = match client.generate(&prompt, body.image_base64.as_deref()).await {
        Ok(raw) => raw,
        Err(e) => return Err(insight_error(e)),
    };

    let draft = match parse_draft(&raw) {
        Some(draft) => draft,
        None => {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: "Could not parse extracted fields".to_string(),
                }),
            ))
        }
    };

    let mut listing = body
        .listing
        .unwrap_or_else(|| Listing::new("Manual Entry", 0.0));
    apply_draft(&draft, &mut listing);

    Ok(Json(ExtractResponse { draft, listing }))
}
