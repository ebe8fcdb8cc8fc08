//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service
//! traits, allowing aggregation, batch and server tests to run without
//! real marketplaces or model endpoints.

mod mock_catalog;
mod mock_insight;
mod mock_source;

pub use mock_catalog::MockCatalog;
pub use mock_insight::MockInsight;
pub use mock_source::MockSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::listing::{Condition, Listing};
    use crate::resolver::CatalogRecord;

    /// Create a test listing with reasonable defaults.
    pub fn listing(source: &str, title: &str, price: f64) -> Listing {
        let mut listing = Listing::new(source, price);
        listing.title = title.to_string();
        listing.condition = Condition::Good;
        listing.seller_rating = 4.5;
        listing.link = format!("https://example.com/{}", title.replace(' ', "-"));
        listing
    }

    /// Create a test catalog record with reasonable defaults.
    pub fn catalog_record(title: &str) -> CatalogRecord {
        CatalogRecord {
            title: title.to_string(),
            authors: vec!["Test Author".to_string()],
            year: "1900".to_string(),
            publisher: "Test House".to_string(),
            description: "A test record.".to_string(),
            image: None,
            category: "Fiction".to_string(),
            preview_link: None,
        }
    }
}
