// file: src/providers/openai.rs
// description: OpenAI chat completions client
// reference: https://platform.openai.com/docs/api-reference/chat

use crate::error::{Result, WorkbenchError};
use crate::providers::TextProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    timeout: Duration,
    max_tokens: u32,
}

impl OpenAiClient {
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
            provider: "openai".to_string(),
            message,
        }
    }
}

#[async_trait]
impl TextProvider for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = system_instruction {
            messages.push(ChatMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt.to_string(),
        });

        let request = ChatRequest {
            model: model.to_string(),
            messages,
            max_tokens: self.max_tokens,
        };

        debug!("Requesting completion from OpenAI for model {}", model);

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Self::provider_error("No choices returned".to_string()))
    }
}
