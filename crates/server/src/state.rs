use std::sync::Arc;

use bookscout_core::{
    Aggregator, BatchPipeline, Config, InsightClient, SanitizedConfig, WatchStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    aggregator: Arc<Aggregator>,
    batch: Arc<BatchPipeline>,
    store: Arc<dyn WatchStore>,
    insight: Option<Arc<dyn InsightClient>>,
}

impl AppState {
    pub fn new(
        config: Config,
        aggregator: Arc<Aggregator>,
        batch: Arc<BatchPipeline>,
        store: Arc<dyn WatchStore>,
        insight: Option<Arc<dyn InsightClient>>,
    ) -> Self {
        Self {
            config,
            aggregator,
            batch,
            store,
            insight,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn aggregator(&self) -> &Aggregator {
        self.aggregator.as_ref()
    }

    pub fn batch(&self) -> &BatchPipeline {
        self.batch.as_ref()
    }

    pub fn store(&self) -> &dyn WatchStore {
        self.store.as_ref()
    }

    pub fn insight(&self) -> Option<&Arc<dyn InsightClient>> {
        self.insight.as_ref()
    }
}
