// file: src/providers/anthropic.rs
// description: Anthropic messages API client
// reference: https://docs.anthropic.com/en/api/messages

use crate::error::{Result, WorkbenchError};
use crate::providers::TextProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    timeout: Duration,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeout_secs: u64, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            timeout: Duration::from_secs(timeout_secs),
            max_tokens,
        }
    }

    fn provider_error(message: String) -> WorkbenchError {
        WorkbenchError::Provider {
            provider: "anthropic".to_string(),
            message,
        }
    }
}

#[async_trait]
impl TextProvider for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String> {
        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens: self.max_tokens,
            system: system_instruction.map(|s| s.to_string()),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        debug!("Requesting completion from Anthropic for model {}", model);

        let response = self
            .client
            .post(MESSAGES_URL)
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::provider_error(format!(
                "Request failed with status {}: {}",
                status, error_text
            )));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse response: {}", e)))?;

        if messages_response.content.is_empty() {
            return Err(Self::provider_error(
                "No content blocks returned".to_string(),
            ));
        }

        Ok(messages_response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
