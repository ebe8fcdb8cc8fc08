//! Mock book catalog for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::resolver::{BookCatalog, CatalogRecord, ResolverError};

use super::fixtures;

/// Mock implementation of the `BookCatalog` trait.
///
/// Clones share state, so a test can assert on recorded lookups.
#[derive(Clone, Debug)]
pub struct MockCatalog {
    record: Option<CatalogRecord>,
    fail: bool,
    /// Recorded lookup queries.
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockCatalog {
    /// Every lookup hits a default record with this title.
    pub fn with_hit(title: &str) -> Self {
        Self::with_record(fixtures::catalog_record(title))
    }

    /// Every lookup hits exactly this record.
    pub fn with_record(record: CatalogRecord) -> Self {
        Self {
            record: Some(record),
            fail: false,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every lookup comes back empty.
    pub fn miss() -> Self {
        Self {
            record: None,
            fail: false,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every lookup fails.
    pub fn failing() -> Self {
        Self {
            record: None,
            fail: true,
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Lookup queries recorded so far, in order.
    pub async fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookCatalog for MockCatalog {
    async fn lookup(&self, query: &str) -> Result<Option<CatalogRecord>, ResolverError> {
        self.lookups.lock().unwrap().push(query.to_string());

        if self.fail {
            return Err(ResolverError::ApiError {
                status: 500,
                message: "mock catalog failure".to_string(),
            });
        }
        Ok(self.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_and_recording() {
        let catalog = MockCatalog::with_hit("Moby Dick");
        let record = catalog.lookup("moby").await.unwrap().unwrap();
        assert_eq!(record.title, "Moby Dick");
        assert_eq!(catalog.recorded_lookups().await, vec!["moby"]);
    }

    #[tokio::test]
    async fn test_miss_and_failure() {
        assert!(MockCatalog::miss().lookup("x").await.unwrap().is_none());
        assert!(MockCatalog::failing().lookup("x").await.is_err());
    }
}
