//! Marketplace listing sources.
//!
//! This module provides a `ListingSource` trait for fetching live listings
//! from marketplace backends (eBay Finding API, web search) plus a
//! synthetic generator used when no live source returns anything.

mod ebay;
mod synthetic;
mod web_search;

pub use ebay::{EbayConfig, EbaySource};
pub use synthetic::{synthetic_listings, SIMULATED_COUNT, SIMULATED_TAG};
pub use web_search::{WebSearchConfig, WebSearchSource};

use async_trait::async_trait;
use thiserror::Error;

use crate::listing::Listing;

/// Errors that can occur when fetching from a listing source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request timed out.
    #[error("Source request timed out")]
    Timeout,

    /// Could not reach the source.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Source returned an error.
    #[error("Source API error: {0}")]
    ApiError(String),

    /// Source not configured (missing API key, etc.).
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Trait for marketplace listing backends.
///
/// Implementations fetch raw listings for a search term and normalize them
/// into the common `Listing` shape. A source never partially fails: it
/// either returns the listings it found (possibly none) or an error.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Stable name used in logs, error maps and metrics.
    fn name(&self) -> &str;

    /// Fetch listings matching the search term.
    async fn fetch(&self, term: &str) -> Result<Vec<Listing>, SourceError>;
}
