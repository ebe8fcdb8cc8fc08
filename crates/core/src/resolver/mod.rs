//! Catalog resolution of free-text queries into bibliographic records.
//!
//! A raw query ("moby dick first ed") is checked against a book catalog;
//! the best hit either confirms the query or yields a cleaned-up
//! suggestion that downstream searches can use instead.

mod google_books;
mod types;

pub use google_books::GoogleBooksCatalog;
pub use types::{CatalogRecord, ResolvedBook, Verdict};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying a book catalog.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for bibliographic catalog backends.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Look up the best catalog match for a free-text query.
    /// Returns `None` when the catalog has no hit at all.
    async fn lookup(&self, query: &str) -> Result<Option<CatalogRecord>, ResolverError>;
}

/// Suggestions longer than the query by this many characters or more are
/// assumed to be a different work and suppressed.
const SUGGESTION_SLACK: usize = 20;

/// Turn a catalog lookup result into a verdict on the raw query.
///
/// A suggestion is offered only when the catalog's "title authors" form
/// differs from the query (case-insensitively) and is not dramatically
/// longer than it; a long mismatch usually means the catalog wandered off
/// to an unrelated volume.
pub fn resolve(query: &str, record: Option<CatalogRecord>) -> ResolvedBook {
    let Some(record) = record else {
        // No catalog hit: synthesize a placeholder record with the raw
        // query standing in as the title so display still has a book.
        return ResolvedBook {
            query: query.to_string(),
            verdict: Verdict::NotFound,
            suggestion: None,
            record: Some(CatalogRecord::fallback(query)),
            read_online: None,
        };
    };

    let full = record.full_title();
    let (verdict, suggestion) = if full.to_lowercase() != query.to_lowercase()
        && full.chars().count() < query.chars().count() + SUGGESTION_SLACK
    {
        (Verdict::Suggestion, Some(full))
    } else {
        (Verdict::Verified, None)
    };

    let read_online = record.read_online_link();
    ResolvedBook {
        query: query.to_string(),
        verdict,
        suggestion,
        record: Some(record),
        read_online: Some(read_online),
    }
}

/// Resolution outcome when the catalog itself failed. The query passes
/// through unchanged rather than blocking the rest of the pipeline.
pub fn unresolved(query: &str) -> ResolvedBook {
    ResolvedBook {
        query: query.to_string(),
        verdict: Verdict::Unknown,
        suggestion: None,
        record: None,
        read_online: None,
    }
}
