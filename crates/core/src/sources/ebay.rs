//! eBay Finding API listing source.
//!
//! Uses the legacy Finding service (findItemsByKeywords), which wraps every
//! field in a single-element array. Only fixed-price listings are requested.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listing::{map_condition, Listing, NO_LINK};

use super::{ListingSource, SourceError};

const ENTRIES_PER_PAGE: u32 = 25;

/// eBay Finding API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbayConfig {
    /// Application ID (required).
    /// Can use ${ENV_VAR} syntax to read from environment.
    pub app_id: String,
    /// Base URL (default: https://svcs.ebay.com/services/search/FindingService/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// eBay Finding API listing source.
pub struct EbaySource {
    client: Client,
    base_url: String,
    app_id: String,
}

impl EbaySource {
    /// Create a new eBay source.
    pub fn new(config: EbayConfig) -> Result<Self, SourceError> {
        if config.app_id.is_empty() {
            return Err(SourceError::NotConfigured(
                "eBay application ID is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;

        let base_url = config.base_url.unwrap_or_else(|| {
            "https://svcs.ebay.com/services/search/FindingService/v1".to_string()
        });

        Ok(Self {
            client,
            base_url,
            app_id: config.app_id,
        })
    }
}

#[async_trait]
impl ListingSource for EbaySource {
    fn name(&self) -> &str {
        "ebay"
    }

    async fn fetch(&self, term: &str) -> Result<Vec<Listing>, SourceError> {
        debug!("eBay search: term='{}'", term);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("OPERATION-NAME", "findItemsByKeywords"),
                ("SERVICE-VERSION", "1.0.0"),
                ("SECURITY-APPNAME", &self.app_id),
                ("RESPONSE-DATA-FORMAT", "JSON"),
                ("REST-PAYLOAD", ""),
                ("keywords", term),
                ("paginationInput.entriesPerPage", &ENTRIES_PER_PAGE.to_string()),
                ("itemFilter(0).name", "ListingType"),
                ("itemFilter(0).value", "FixedPrice"),
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

        let finding: FindingResponse = response
            .json()
            .await
            .map_err(|e| SourceError::ApiError(format!("Failed to parse response: {}", e)))?;

        let items = finding
            .find_items_by_keywords_response
            .into_iter()
            .next()
            .and_then(|r| r.search_result.into_iter().next())
            .map(|s| s.item)
            .unwrap_or_default();

        debug!(results = items.len(), "eBay search complete");

        Ok(items.into_iter().map(normalize_item).collect())
    }
}

fn normalize_item(item: FindingItem) -> Listing {
    let price = item
        .selling_status
        .into_iter()
        .next()
        .and_then(|s| s.current_price.into_iter().next())
        .and_then(|p| p.value.parse::<f64>().ok())
        .unwrap_or(0.0);

    let link = item
        .view_item_url
        .into_iter()
        .next()
        .unwrap_or_else(|| NO_LINK.to_string());

    let title = item
        .title
        .into_iter()
        .next()
        .unwrap_or_else(|| "Unknown Title".to_string());

    let condition_raw = item
        .condition
        .into_iter()
        .next()
        .and_then(|c| c.condition_display_name.into_iter().next())
        .unwrap_or_else(|| "Good".to_string());

    let mut listing = Listing::new("eBay", price);
    listing.title = title;
    listing.condition = map_condition(&condition_raw);
    listing.details = vec!["Live Listing".to_string()];
    listing.seller_rating = 4.5;
    listing.link = link;
    listing
}

// ============================================================================
// Finding API Response Types (private)
// ============================================================================
//
// Every field in this payload is an array of one.

#[derive(Debug, Deserialize)]
struct FindingResponse {
    #[serde(rename = "findItemsByKeywordsResponse", default)]
    find_items_by_keywords_response: Vec<FindingResult>,
}

#[derive(Debug, Deserialize)]
struct FindingResult {
    #[serde(rename = "searchResult", default)]
    search_result: Vec<FindingSearchResult>,
}

#[derive(Debug, Deserialize)]
struct FindingSearchResult {
    #[serde(default)]
    item: Vec<FindingItem>,
}

#[derive(Debug, Deserialize)]
struct FindingItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "viewItemURL", default)]
    view_item_url: Vec<String>,
    #[serde(rename = "sellingStatus", default)]
    selling_status: Vec<SellingStatus>,
    #[serde(default)]
    condition: Vec<ItemCondition>,
}

#[derive(Debug, Deserialize)]
struct SellingStatus {
    #[serde(rename = "currentPrice", default)]
    current_price: Vec<CurrentPrice>,
}

#[derive(Debug, Deserialize)]
struct CurrentPrice {
    #[serde(rename = "__value__", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct ItemCondition {
    #[serde(rename = "conditionDisplayName", default)]
    condition_display_name: Vec<String>,
}
