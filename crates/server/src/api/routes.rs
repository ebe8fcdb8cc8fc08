use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{batch, handlers, insight, middleware::metrics_middleware, search, watch};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config, metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Search and listings
        .route("/search", post(search::search))
        .route("/listings/sort", post(search::sort))
        .route("/listings/analytics", post(search::analytics))
        // Batch validation
        .route("/batch", post(batch::run))
        .route("/batch/apply", post(batch::apply))
        .route("/batch/export", post(batch::export))
        // Price alerts
        .route("/alerts", get(watch::list_alerts))
        .route("/alerts", post(watch::create_alert))
        .route("/alerts/{id}", delete(watch::delete_alert))
        // Wishlist
        .route("/wishlist", get(watch::list_wishlist))
        .route("/wishlist/toggle", post(watch::toggle_wishlist))
        .route("/wishlist/{id}", delete(watch::delete_wishlist))
        // AI insight
        .route("/insight/report", post(insight::report))
        .route("/insight/extract", post(insight::extract))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
