//! AI insight generation: curator reports and listing extraction from
//! pasted text or photographs.

mod extract;
mod gemini;

pub use extract::{apply_draft, parse_draft, ListingDraft, EXTRACT_PROMPT};
pub use gemini::{GeminiClient, GeminiConfig};

use async_trait::async_trait;

/// Error type for insight operations.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Not configured")]
    NotConfigured,
}

/// Trait for generative insight providers.
#[async_trait]
pub trait InsightClient: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn provider(&self) -> &str;

    /// Generate text for a prompt, optionally grounded on a base64 image.
    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> Result<String, InsightError>;
}

/// Prompt for a collector-oriented report on a specific book.
pub fn report_prompt(title: &str, author: &str) -> String {
    format!(
        "Write insight about '{}' by '{}'. Significance & First Edition markers. Concise.",
        title, author
    )
}
