//! Batch validation pipeline.
//!
//! Takes a newline-separated list of raw queries, resolves each against
//! the catalog, and (when live search is on) samples the market for the
//! corrected term. Queries are processed with bounded concurrency and
//! results come back in input order.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::aggregator::Aggregator;
use crate::metrics;
use crate::resolver::{self, BookCatalog};

use super::types::{BatchFilter, BatchResult, MarketStats};

pub struct BatchPipeline {
    catalog: Arc<dyn BookCatalog>,
    aggregator: Arc<Aggregator>,
    live: bool,
    concurrency: usize,
}

impl BatchPipeline {
    pub fn new(
        catalog: Arc<dyn BookCatalog>,
        aggregator: Arc<Aggregator>,
        live: bool,
        concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            aggregator,
            live,
            concurrency: concurrency.max(1),
        }
    }

    /// Validate a newline-separated batch of queries.
    ///
    /// Blank lines are skipped; everything else produces exactly one
    /// result, in input order. No synthetic listings are ever generated
    /// here: an empty market is reported as absent stats, not invented.
    pub async fn run(&self, input: &str, filter: &BatchFilter) -> Vec<BatchResult> {
        let start = Instant::now();
        let suffix = filter.suffix();

        let queries: Vec<String> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        debug!(queries = queries.len(), "Starting batch run");

        let results: Vec<BatchResult> = stream::iter(queries)
            .map(|query| {
                let suffix = suffix.clone();
                async move { self.process_query(&query, &suffix).await }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for result in &results {
            metrics::BATCH_QUERIES
                .with_label_values(&[result.verdict.label()])
                .inc();
        }
        metrics::BATCH_DURATION
            .with_label_values(&[])
            .observe(start.elapsed().as_secs_f64());

        debug!(
            results = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch run complete"
        );

        results
    }

    async fn process_query(&self, query: &str, suffix: &str) -> BatchResult {
        let resolved = match self.catalog.lookup(query).await {
            Ok(record) => resolver::resolve(query, record),
            Err(e) => {
                warn!(query = %query, error = %e, "Catalog lookup failed in batch");
                resolver::unresolved(query)
            }
        };

        let search_term = format!("{}{}", resolved.search_term(), suffix);

        let stats = if self.live {
            let (listings, _errors) = self.aggregator.fetch_live(&search_term).await;
            MarketStats::from_listings(&listings)
        } else {
            None
        };

        BatchResult::new(&resolved, &search_term, stats)
    }
}
