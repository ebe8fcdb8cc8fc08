//! Search and listing API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use bookscout_core::{
    analytics::PriceAnalytics, listing::sort_listings, Listing, SearchOutcome, SortKey,
};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<PriceAnalytics>,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct SortResponse {
    pub listings: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    pub listings: Vec<Listing>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<PriceAnalytics>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
///
/// Resolve a query against the catalog, fan out to listing sources and
/// return ranked listings with price analytics. Degrades instead of
/// failing: source errors come back per source, and an empty live market
/// falls back to a synthetic one when the catalog matched.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let outcome = state.aggregator().search(&body.query, body.sort).await;
    let analytics = PriceAnalytics::from_listings(&outcome.listings);
    Json(SearchResponse { outcome, analytics })
}

/// POST /api/v1/listings/sort
///
/// Re-score and re-sort a listing set the client already holds.
pub async fn sort(Json(body): Json<SortRequest>) -> Json<SortResponse> {
    Json(SortResponse {
        listings: sort_listings(body.listings, body.sort),
    })
}

/// POST /api/v1/listings/analytics
///
/// Recompute price analytics for a listing set, e.g. after client-side
/// edits. Absent analytics means no positively priced listings.
pub async fn analytics(Json(body): Json<AnalyticsRequest>) -> Json<AnalyticsResponse> {
    Json(AnalyticsResponse {
        analytics: PriceAnalytics::from_listings(&body.listings),
    })
}
