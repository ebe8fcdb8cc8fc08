//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Aggregated searches (fan-out duration, listings returned, fallbacks)
//! - Batch validation runs
//! - External services (catalog, listing sources, insight provider)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Aggregated searches total by outcome.
pub static SEARCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("bookscout_searches_total", "Total aggregated searches"),
        &["outcome"], // "live", "simulated", "empty"
    )
    .unwrap()
});

/// Search fan-out duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookscout_search_duration_seconds",
            "Duration of an aggregated search",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &[],
    )
    .unwrap()
});

/// Listings returned per search.
pub static LISTINGS_RETURNED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "bookscout_listings_returned",
            "Number of listings returned per search",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &[],
    )
    .unwrap()
});

/// Source failures total by source.
pub static SOURCE_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookscout_source_failures_total",
            "Total listing source failures",
        ),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Batch Metrics
// =============================================================================

/// Batch queries processed total by verdict.
pub static BATCH_QUERIES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookscout_batch_queries_total",
            "Total batch queries processed",
        ),
        &["verdict"], // "verified", "suggestion", "not_found", "unknown"
    )
    .unwrap()
});

/// Batch run duration in seconds.
pub static BATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("bookscout_batch_duration_seconds", "Duration of a batch run")
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &[],
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookscout_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "status"], // status: "success", "error"
    )
    .unwrap()
});

/// Insight reports generated total.
pub static INSIGHT_REPORTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bookscout_insight_reports_total",
        "Total insight reports generated",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search
        Box::new(SEARCHES_TOTAL.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(LISTINGS_RETURNED.clone()),
        Box::new(SOURCE_FAILURES.clone()),
        // Batch
        Box::new(BATCH_QUERIES.clone()),
        Box::new(BATCH_DURATION.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(INSIGHT_REPORTS.clone()),
    ]
}
