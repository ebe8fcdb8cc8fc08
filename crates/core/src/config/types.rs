use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::insight::GeminiConfig;
use crate::sources::{EbayConfig, WebSearchConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub insight: Option<GeminiConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("bookscout.db")
}

/// Search behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Whether to hit live marketplace APIs. When false every search
    /// falls back to the synthetic market.
    #[serde(default = "default_live")]
    pub live: bool,
    /// Per-source fetch timeout in seconds (default: 10)
    #[serde(default = "default_adapter_timeout")]
    pub adapter_timeout_secs: u32,
    /// How many batch queries are validated at once (default: 4)
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            live: default_live(),
            adapter_timeout_secs: default_adapter_timeout(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

fn default_live() -> bool {
    true
}

fn default_adapter_timeout() -> u32 {
    10
}

fn default_batch_concurrency() -> usize {
    4
}

/// Listing source configuration. Sources left out are simply not
/// consulted; a deployment with no sources still works on synthetics.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub ebay: Option<EbayConfig>,
    #[serde(default)]
    pub web_search: Option<WebSearchConfig>,
}

/// Book catalog configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL override (default: the public Google Books API)
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub sources: SanitizedSourcesConfig,
    pub catalog: CatalogConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<SanitizedInsightConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourcesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebay: Option<SanitizedEbayConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search: Option<SanitizedWebSearchConfig>,
}

/// Sanitized eBay config (application ID hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedEbayConfig {
    pub app_id_configured: bool,
}

/// Sanitized web search config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedWebSearchConfig {
    pub api_key_configured: bool,
    pub cx_id: String,
}

/// Sanitized insight config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedInsightConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            search: config.search.clone(),
            sources: SanitizedSourcesConfig {
                ebay: config.sources.ebay.as_ref().map(|e| SanitizedEbayConfig {
                    app_id_configured: !e.app_id.is_empty(),
                }),
                web_search: config
                    .sources
                    .web_search
                    .as_ref()
                    .map(|w| SanitizedWebSearchConfig {
                        api_key_configured: !w.api_key.is_empty(),
                        cx_id: w.cx_id.clone(),
                    }),
            },
            catalog: config.catalog.clone(),
            insight: config.insight.as_ref().map(|i| SanitizedInsightConfig {
                api_key_configured: !i.api_key.is_empty(),
                model: i.model.clone(),
            }),
        }
    }
}
