//! Search aggregation across catalog and marketplace sources.
//!
//! A single search resolves the query against the book catalog, fans out
//! to every configured listing source in parallel, tolerates individual
//! source failures, and falls back to a synthetic market when nothing
//! live comes back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::listing::{sort_listings, Listing, SortKey};
use crate::metrics;
use crate::resolver::{self, BookCatalog, ResolvedBook};
use crate::sources::{synthetic_listings, ListingSource, SourceError};

/// Result of one aggregated search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// The resolved query, including any catalog record that matched.
    pub resolved: ResolvedBook,
    /// Listings in the requested sort order, scores populated.
    pub listings: Vec<Listing>,
    /// True when the listings are synthetic rather than live.
    pub simulated: bool,
    /// Per-source failure messages; sources that succeeded are absent.
    pub source_errors: HashMap<String, String>,
    pub duration_ms: u64,
}

/// Fans searches out across the configured listing sources.
pub struct Aggregator {
    catalog: Arc<dyn BookCatalog>,
    sources: Vec<Arc<dyn ListingSource>>,
    live: bool,
    adapter_timeout: Duration,
}

impl Aggregator {
    pub fn new(
        catalog: Arc<dyn BookCatalog>,
        sources: Vec<Arc<dyn ListingSource>>,
        live: bool,
        adapter_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            sources,
            live,
            adapter_timeout,
        }
    }

    /// Run a full aggregated search for a raw query.
    ///
    /// Never fails outright: catalog errors degrade to an unresolved query,
    /// source errors are collected per source, and an all-empty live result
    /// falls back to a synthetic market when a catalog record exists.
    pub async fn search(&self, query: &str, sort: SortKey) -> SearchOutcome {
        let start = Instant::now();

        let resolved = match self.catalog.lookup(query).await {
            Ok(record) => resolver::resolve(query, record),
            Err(e) => {
                warn!(error = %e, "Catalog lookup failed");
                metrics::EXTERNAL_SERVICE_REQUESTS
                    .with_label_values(&["catalog", "error"])
                    .inc();
                resolver::unresolved(query)
            }
        };
        if resolved.catalog_hit() {
            metrics::EXTERNAL_SERVICE_REQUESTS
                .with_label_values(&["catalog", "success"])
                .inc();
        }

        let (mut listings, source_errors) = if self.live {
            self.fetch_live(query).await
        } else {
            (Vec::new(), HashMap::new())
        };

        let mut simulated = false;
        if listings.is_empty() && resolved.catalog_hit() {
            if let Some(record) = &resolved.record {
                listings = synthetic_listings(record, &mut rand::thread_rng());
                simulated = true;
            }
        }

        if resolved.catalog_hit() {
            if let Some(record) = &resolved.record {
                let author = record.author_label();
                for listing in &mut listings {
                    listing.enrich(&record.title, &author, &record.year, &record.publisher);
                }
            }
        }

        let listings = sort_listings(listings, sort);
        let duration_ms = start.elapsed().as_millis() as u64;

        let outcome_label = if simulated {
            "simulated"
        } else if listings.is_empty() {
            "empty"
        } else {
            "live"
        };
        metrics::SEARCHES_TOTAL
            .with_label_values(&[outcome_label])
            .inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[])
            .observe(start.elapsed().as_secs_f64());
        metrics::LISTINGS_RETURNED
            .with_label_values(&[])
            .observe(listings.len() as f64);

        debug!(
            query = %query,
            listings = listings.len(),
            simulated = simulated,
            duration_ms = duration_ms,
            "Search complete"
        );

        SearchOutcome {
            resolved,
            listings,
            simulated,
            source_errors,
            duration_ms,
        }
    }

    /// Fan out to every source in parallel, bounding each by the adapter
    /// timeout. Returns what was found plus per-source failure messages.
    pub async fn fetch_live(&self, term: &str) -> (Vec<Listing>, HashMap<String, String>) {
        let fetches: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let term = term.to_string();
                let timeout = self.adapter_timeout;
                async move {
                    let result = match tokio::time::timeout(timeout, source.fetch(&term)).await {
                        Ok(r) => r,
                        Err(_) => Err(SourceError::Timeout),
                    };
                    (source.name().to_string(), result)
                }
            })
            .collect();

        let results = futures::future::join_all(fetches).await;

        let mut listings = Vec::new();
        let mut errors = HashMap::new();
        for (name, result) in results {
            match result {
                Ok(mut found) => listings.append(&mut found),
                Err(e) => {
                    warn!(source = %name, error = %e, "Source fetch failed");
                    metrics::SOURCE_FAILURES.with_label_values(&[&name]).inc();
                    errors.insert(name, e.to_string());
                }
            }
        }
        (listings, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Verdict;
    use crate::sources::{SIMULATED_COUNT, SIMULATED_TAG};
    use crate::testing::{MockCatalog, MockSource};

    fn aggregator(catalog: MockCatalog, sources: Vec<Arc<dyn ListingSource>>) -> Aggregator {
        Aggregator::new(
            Arc::new(catalog),
            sources,
            true,
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_live_listings_collected_and_sorted() {
        let source = MockSource::new("mock").with_listings(vec![
            Listing::new("eBay", 300.0),
            Listing::new("eBay", 100.0),
        ]);
        let agg = aggregator(MockCatalog::with_hit("Moby Dick"), vec![Arc::new(source)]);

        let outcome = agg.search("moby dick", SortKey::PriceAsc).await;
        assert!(!outcome.simulated);
        assert_eq!(outcome.listings.len(), 2);
        assert_eq!(outcome.listings[0].price, 100.0);
        assert!(outcome.source_errors.is_empty());
    }

    #[tokio::test]
    async fn test_failed_source_does_not_sink_search() {
        let good = MockSource::new("good").with_listings(vec![Listing::new("eBay", 50.0)]);
        let bad = MockSource::new("bad").with_error("boom");
        let agg = aggregator(
            MockCatalog::with_hit("Moby Dick"),
            vec![Arc::new(good), Arc::new(bad)],
        );

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert_eq!(outcome.listings.len(), 1);
        assert!(!outcome.simulated);
        assert!(outcome.source_errors.contains_key("bad"));
    }

    #[tokio::test]
    async fn test_synthetic_fallback_when_sources_empty() {
        let empty = MockSource::new("empty");
        let agg = aggregator(MockCatalog::with_hit("Moby Dick"), vec![Arc::new(empty)]);

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert!(outcome.simulated);
        assert_eq!(outcome.listings.len(), SIMULATED_COUNT);
        assert!(outcome
            .listings
            .iter()
            .all(|l| l.details.contains(&SIMULATED_TAG.to_string())));
    }

    #[tokio::test]
    async fn test_no_synthetics_without_catalog_record() {
        let empty = MockSource::new("empty");
        let agg = aggregator(MockCatalog::miss(), vec![Arc::new(empty)]);

        let outcome = agg.search("gibberish xyzzy", SortKey::Value).await;
        assert!(!outcome.simulated);
        assert!(outcome.listings.is_empty());
        assert_eq!(outcome.resolved.verdict, Verdict::NotFound);
        // the placeholder record is for display only, never a market seed
        let record = outcome.resolved.record.as_ref().unwrap();
        assert_eq!(record.title, "gibberish xyzzy");
    }

    #[tokio::test]
    async fn test_catalog_failure_degrades_to_unknown() {
        let source = MockSource::new("mock").with_listings(vec![Listing::new("eBay", 25.0)]);
        let agg = aggregator(MockCatalog::failing(), vec![Arc::new(source)]);

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert_eq!(outcome.resolved.verdict, Verdict::Unknown);
        assert_eq!(outcome.listings.len(), 1);
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let slow = MockSource::new("slow").with_delay(Duration::from_secs(5));
        let fast = MockSource::new("fast").with_listings(vec![Listing::new("eBay", 10.0)]);
        let agg = aggregator(
            MockCatalog::with_hit("Moby Dick"),
            vec![Arc::new(slow), Arc::new(fast)],
        );

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert_eq!(outcome.listings.len(), 1);
        assert!(outcome.source_errors.contains_key("slow"));
    }

    #[tokio::test]
    async fn test_live_disabled_goes_straight_to_synthetics() {
        let source = MockSource::new("mock").with_listings(vec![Listing::new("eBay", 10.0)]);
        let agg = Aggregator::new(
            Arc::new(MockCatalog::with_hit("Moby Dick")),
            vec![Arc::new(source)],
            false,
            Duration::from_millis(200),
        );

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert!(outcome.simulated);
        assert_eq!(outcome.listings.len(), SIMULATED_COUNT);
    }

    #[tokio::test]
    async fn test_listings_enriched_from_record() {
        let source = MockSource::new("mock").with_listings(vec![Listing::new("eBay", 10.0)]);
        let agg = aggregator(MockCatalog::with_hit("Moby Dick"), vec![Arc::new(source)]);

        let outcome = agg.search("moby dick", SortKey::Value).await;
        assert_eq!(outcome.listings[0].title, "Moby Dick");
        assert!(!outcome.listings[0].author.is_empty());
    }
}
