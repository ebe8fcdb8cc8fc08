//! Mock listing source for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::listing::Listing;
use crate::sources::{ListingSource, SourceError};

/// Mock implementation of the `ListingSource` trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable listings
/// - Track fetched search terms for assertions
/// - Simulate failures and delays
///
/// Clones share state, so a test can keep a handle for assertions while
/// handing another to the aggregator.
#[derive(Clone, Debug)]
pub struct MockSource {
    name: String,
    listings: Vec<Listing>,
    error: Option<String>,
    delay: Option<Duration>,
    /// Recorded search terms.
    terms: Arc<Mutex<Vec<String>>>,
}

impl MockSource {
    /// Create a new mock source that returns no listings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            listings: Vec::new(),
            error: None,
            delay: None,
            terms: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return these listings for every fetch.
    pub fn with_listings(mut self, listings: Vec<Listing>) -> Self {
        self.listings = listings;
        self
    }

    /// Fail every fetch with this message.
    pub fn with_error(mut self, message: &str) -> Self {
        self.error = Some(message.to_string());
        self
    }

    /// Sleep before responding, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Search terms fetched so far, in order.
    pub async fn recorded_terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.terms.lock().unwrap().len()
    }
}

#[async_trait]
impl ListingSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, term: &str) -> Result<Vec<Listing>, SourceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.terms.lock().unwrap().push(term.to_string());

        match &self.error {
            Some(message) => Err(SourceError::ApiError(message.clone())),
            None => Ok(self.listings.clone()),
        }
    }
}
