//! Mock insight provider for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::insight::{InsightClient, InsightError};

/// A recorded generate call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPrompt {
    pub prompt: String,
    pub had_image: bool,
}

/// Mock implementation of the `InsightClient` trait.
#[derive(Clone, Debug)]
pub struct MockInsight {
    response: String,
    fail: bool,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

impl MockInsight {
    /// Always respond with this text.
    pub fn with_response(text: &str) -> Self {
        Self {
            response: text.to_string(),
            fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts recorded so far, in order.
    pub async fn recorded_prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InsightClient for MockInsight {
    fn provider(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        image_base64: Option<&str>,
    ) -> Result<String, InsightError> {
        self.prompts.lock().unwrap().push(RecordedPrompt {
            prompt: prompt.to_string(),
            had_image: image_base64.is_some(),
        });

        if self.fail {
            return Err(InsightError::Api {
                status: 500,
                message: "mock insight failure".to_string(),
            });
        }
        Ok(self.response.clone())
    }
}
