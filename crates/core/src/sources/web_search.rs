//! Google Custom Search listing source.
//!
//! Scrapes prices out of search snippets across bookseller sites. Results
//! without a recognizable price are discarded; a snippet with no price is
//! almost never an actual listing page.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listing::{Condition, Listing};

use super::{ListingSource, SourceError};

/// Dollar, pound or euro amount with optional thousands separators.
static PRICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\$|£|€)(\d{1,3}(?:,\d{3})*(?:\.\d{2})?)").unwrap()
});

/// Google Custom Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// API key (required).
    /// Can use ${ENV_VAR} syntax to read from environment.
    pub api_key: String,
    /// Custom search engine ID (required).
    pub cx_id: String,
    /// Base URL (default: https://www.googleapis.com/customsearch/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Google Custom Search listing source.
pub struct WebSearchSource {
    client: Client,
    base_url: String,
    api_key: String,
    cx_id: String,
}

impl WebSearchSource {
    /// Create a new web search source.
    pub fn new(config: WebSearchConfig) -> Result<Self, SourceError> {
        if config.api_key.is_empty() || config.cx_id.is_empty() {
            return Err(SourceError::NotConfigured(
                "Web search API key and engine ID are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.googleapis.com/customsearch/v1".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            cx_id: config.cx_id,
        })
    }
}

#[async_trait]
impl ListingSource for WebSearchSource {
    fn name(&self) -> &str {
        "web_search"
    }

    async fn fetch(&self, term: &str) -> Result<Vec<Listing>, SourceError> {
        debug!("web search: term='{}'", term);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx_id.as_str()),
                ("q", term),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else if e.is_connect() {
                    SourceError::ConnectionFailed(e.to_string())
                } else {
                    SourceError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let result: CustomSearchResponse = response
            .json()
            .await
            .map_err(|e| SourceError::ApiError(format!("Failed to parse response: {}", e)))?;

        let listings: Vec<Listing> = result
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_item)
            .collect();

        debug!(results = listings.len(), "web search complete");

        Ok(listings)
    }
}

/// Turn a search hit into a listing, or `None` when no price is visible.
fn normalize_item(item: SearchItem) -> Option<Listing> {
    let haystack = format!("{}{}", item.snippet, item.title);
    let price = PRICE_RE
        .captures(&haystack)
        .and_then(|c| c.get(2))
        .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())?;
    if price == 0.0 {
        return None;
    }

    let source = if item.link.contains("abebooks") {
        "AbeBooks"
    } else if item.link.contains("biblio") {
        "Biblio"
    } else if item.link.contains("alibris") {
        "Alibris"
    } else if item.link.contains("strandbooks") {
        "Strand"
    } else {
        "Web Market"
    };

    let mut listing = Listing::new(source, price);
    listing.title = item.title;
    listing.condition = if item.snippet.to_lowercase().contains("fine") {
        Condition::Fine
    } else {
        Condition::Good
    };
    listing.details = vec!["Web Detected".to_string()];
    listing.seller_rating = 4.0;
    listing.link = item.link;
    Some(listing)
}

// ============================================================================
// Custom Search API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}
