//! Common test utilities for E2E testing with mocks.
//!
//! Builds an in-process server with mock dependencies injected, so API
//! tests run without real marketplaces, catalogs or model endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bookscout_core::{
    store::SqliteWatchStore,
    testing::{MockCatalog, MockInsight, MockSource},
    Aggregator, BatchPipeline, BookCatalog, Config, InsightClient, ListingSource, WatchStore,
};

/// Re-export fixtures for test convenience
pub use bookscout_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog, shares state with the instance wired into the server
    pub catalog: MockCatalog,
    /// Mock listing source, shares state likewise
    pub source: MockSource,
    /// Mock insight client, absent when testing the unconfigured path
    pub insight: Option<MockInsight>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub catalog: MockCatalog,
    pub source: MockSource,
    pub insight: Option<MockInsight>,
    pub live: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            catalog: MockCatalog::with_hit("Moby Dick"),
            source: MockSource::new("eBay")
                .with_listings(vec![fixtures::listing("eBay", "Moby Dick", 120.0)]),
            insight: Some(MockInsight::with_response("A famous whale novel.")),
            live: true,
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom mocks.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let TestConfig {
            catalog,
            source,
            insight,
            live,
        } = test_config;

        let catalog_dyn: Arc<dyn BookCatalog> = Arc::new(catalog.clone());
        let sources: Vec<Arc<dyn ListingSource>> = vec![Arc::new(source.clone())];

        let aggregator = Arc::new(Aggregator::new(
            Arc::clone(&catalog_dyn),
            sources,
            live,
            Duration::from_secs(2),
        ));
        let batch = Arc::new(BatchPipeline::new(
            Arc::clone(&catalog_dyn),
            Arc::clone(&aggregator),
            live,
            4,
        ));

        let store: Arc<dyn WatchStore> =
            Arc::new(SqliteWatchStore::in_memory().expect("Failed to create store"));

        let insight_dyn: Option<Arc<dyn InsightClient>> = insight
            .clone()
            .map(|mock| Arc::new(mock) as Arc<dyn InsightClient>);

        let state = Arc::new(bookscout_server::state::AppState::new(
            Config::default(),
            aggregator,
            batch,
            store,
            insight_dyn,
        ));

        let router = bookscout_server::api::create_router(state);

        Self {
            router,
            catalog,
            source,
            insight,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request and return the raw body as text.
    pub async fn post_text(&self, path: &str, body: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
