//! Gemini generateContent client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{InsightClient, InsightError};

const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Gemini API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (required).
    /// Can use ${ENV_VAR} syntax to read from environment.
    pub api_key: String,
    /// Model name (default: gemini-2.5-flash-preview-09-2025).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Base URL (default: https://generativelanguage.googleapis.com/v1beta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Gemini API client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, InsightError> {
        if config.api_key.is_empty() {
            return Err(InsightError::NotConfigured);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config.base_url.unwrap_or_else(|| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
        })
    }
}

#[async_trait]
impl InsightClient for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> Result<String, InsightError> {
        let mut parts = vec![Part {
            text: Some(prompt.to_string()),
            inline_data: None,
        }];

        if let Some(image) = image_base64 {
            // Data URLs carry a "data:image/png;base64," prefix; the API
            // wants only the payload.
            let clean = image.rsplit(',').next().unwrap_or(image);
            parts.push(Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: "image/png".to_string(),
                    data: clean.to_string(),
                }),
            });
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, with_image = image_base64.is_some(), "Gemini generate");

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&GenerateRequest {
                contents: vec![Content { parts }],
            })
            .send()
            .await
            .map_err(|e| InsightError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(InsightError::Api { status, message });
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Json(e.to_string()))?;

        Ok(generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default())
    }
}

// ============================================================================
// Gemini API Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let err = GeminiClient::new(GeminiConfig {
            api_key: String::new(),
            model: None,
            base_url: None,
        })
        .err()
        .unwrap();
        assert!(matches!(err, InsightError::NotConfigured));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some("describe".to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".to_string(),
                            data: "aGVsbG8=".to_string(),
                        }),
                    },
                ],
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"text\":\"describe\""));
        assert!(json.contains("\"inlineData\""));
        assert!(json.contains("\"mimeType\":\"image/png\""));
        // A text-only part must not leak an empty inlineData
        assert!(!json.contains("\"inlineData\":null"));
    }

    #[test]
    fn test_response_extraction() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "A significant first edition."}]}}]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        assert_eq!(text, "A significant first edition.");
    }

    #[test]
    fn test_empty_response_is_empty_string() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
