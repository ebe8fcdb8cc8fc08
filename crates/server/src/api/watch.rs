//! Price alert and wishlist API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use bookscout_core::{Alert, Listing, NewAlert, SavedListing, StoreError};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub saved: Vec<SavedListing>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub listing: Listing,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// True when the listing is on the wishlist after the toggle.
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn store_error(e: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

// ============================================================================
// Alert handlers
// ============================================================================

/// GET /api/v1/alerts
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlertsResponse>, impl IntoResponse> {
    match state.store().list_alerts() {
        Ok(alerts) => Ok(Json(AlertsResponse { alerts })),
        Err(e) => Err(store_error(e)),
    }
}

/// POST /api/v1/alerts
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewAlert>,
) -> Result<(StatusCode, Json<Alert>), impl IntoResponse> {
    match state.store().add_alert(body) {
        Ok(alert) => Ok((StatusCode::CREATED, Json(alert))),
        Err(e) => Err(store_error(e)),
    }
}

/// DELETE /api/v1/alerts/{id}
pub async fn delete_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, impl IntoResponse> {
    match state.store().delete_alert(&id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Ok(StatusCode::NOT_FOUND),
        Err(e) => Err(store_error(e)),
    }
}

// ============================================================================
// Wishlist handlers
// ============================================================================

/// GET /api/v1/wishlist
pub async fn list_wishlist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WishlistResponse>, impl IntoResponse> {
    match state.store().list_saved() {
        Ok(saved) => Ok(Json(WishlistResponse { saved })),
        Err(e) => Err(store_error(e)),
    }
}

/// POST /api/v1/wishlist/toggle
///
/// Save the listing, or remove it if an equivalent listing is already
/// saved. Equivalence uses the listing identity heuristic, so the same
/// offer found in two searches toggles the same wishlist entry.
pub async fn toggle_wishlist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, impl IntoResponse> {
    match state.store().toggle_saved(&body.listing) {
        Ok(saved) => Ok(Json(ToggleResponse { saved })),
        Err(e) => Err(store_error(e)),
    }
}

/// DELETE /api/v1/wishlist/{id}
pub async fn delete_wishlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, impl IntoResponse> {
    match state.store().delete_saved(&id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Ok(StatusCode::NOT_FOUND),
        Err(e) => Err(store_error(e)),
    }
}
