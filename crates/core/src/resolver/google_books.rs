//! Google Books API client.
//!
//! The volumes endpoint is keyless and rate limits are generous enough
//! for interactive use; only the first hit is consulted.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::CatalogRecord;
use super::{BookCatalog, ResolverError};

/// Google Books API client.
pub struct GoogleBooksCatalog {
    client: Client,
    base_url: String,
}

impl GoogleBooksCatalog {
    /// Create a new client. `base_url` defaults to the public API.
    pub fn new(base_url: Option<String>) -> Result<Self, ResolverError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url =
            base_url.unwrap_or_else(|| "https://www.googleapis.com/books/v1".to_string());

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksCatalog {
    async fn lookup(&self, query: &str) -> Result<Option<CatalogRecord>, ResolverError> {
        let url = format!("{}/volumes", self.base_url);

        debug!("catalog lookup: query='{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(ResolverError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolverError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let volumes: VolumesResponse = response.json().await.map_err(|e| {
            ResolverError::ParseError(format!("Failed to parse volumes response: {}", e))
        })?;

        Ok(volumes
            .items
            .and_then(|items| items.into_iter().next())
            .map(|v| v.volume_info.into()))
    }
}

// ============================================================================
// Google Books API Response Types (private)
// ============================================================================

#[derive(Debug, serde::Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, serde::Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, serde::Deserialize)]
struct VolumeInfo {
    title: String,
    authors: Option<Vec<String>>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    publisher: Option<String>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
    categories: Option<Vec<String>>,
    #[serde(rename = "previewLink")]
    preview_link: Option<String>,
    #[serde(rename = "infoLink")]
    info_link: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<VolumeInfo> for CatalogRecord {
    fn from(info: VolumeInfo) -> Self {
        // publishedDate may be a bare year or a full date; the first four
        // characters cover both.
        let year = info
            .published_date
            .as_deref()
            .map(|d| d.chars().take(4).collect::<String>())
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            year,
            publisher: info.publisher.unwrap_or_else(|| "Unknown".to_string()),
            description: info
                .description
                .unwrap_or_else(|| "No description.".to_string()),
            image: info.image_links.and_then(|l| l.thumbnail),
            category: info
                .categories
                .and_then(|c| c.into_iter().next())
                .unwrap_or_else(|| "Rare Book".to_string()),
            preview_link: info.preview_link.or(info.info_link),
        }
    }
}
