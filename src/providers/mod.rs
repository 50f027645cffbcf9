// file: src/providers/mod.rs
// description: provider capability trait and model-prefix dispatch
// reference: vendor chat APIs behind one generate() seam

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use crate::config::ProvidersConfig;
use crate::error::{Result, WorkbenchError};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

/// Model-identifier prefix table; first match wins.
const MODEL_PREFIXES: &[(&str, ProviderKind)] = &[
    ("gpt-", ProviderKind::OpenAi),
    ("chatgpt-", ProviderKind::OpenAi),
    ("o1", ProviderKind::OpenAi),
    ("o3", ProviderKind::OpenAi),
    ("claude-", ProviderKind::Anthropic),
    ("gemini-", ProviderKind::Gemini),
    ("gemma-", ProviderKind::Gemini),
];

impl ProviderKind {
    pub fn for_model(model: &str) -> Option<Self> {
        let lower = model.to_ascii_lowercase();
        MODEL_PREFIXES
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

/// Capability every vendor client offers: generate text for a named model
/// given a prompt and an optional system instruction.
#[async_trait]
pub trait TextProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String>;
}

/// Configured clients, one per vendor with a key present. An explicit
/// context object: callers hold a registry instead of reaching for
/// process-wide singletons.
pub struct ProviderRegistry {
    openai: Option<OpenAiClient>,
    anthropic: Option<AnthropicClient>,
    gemini: Option<GeminiClient>,
}

impl ProviderRegistry {
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let timeout = config.request_timeout_secs;
        let max_tokens = config.max_tokens;

        Self {
            openai: config
                .openai_api_key
                .clone()
                .map(|key| OpenAiClient::new(key, timeout, max_tokens)),
            anthropic: config
                .anthropic_api_key
                .clone()
                .map(|key| AnthropicClient::new(key, timeout, max_tokens)),
            gemini: config
                .gemini_api_key
                .clone()
                .map(|key| GeminiClient::new(key, timeout, max_tokens)),
        }
    }

    pub fn client_for(&self, model: &str) -> Result<&dyn TextProvider> {
        let kind = ProviderKind::for_model(model)
            .ok_or_else(|| WorkbenchError::UnknownModel(model.to_string()))?;

        let client: Option<&dyn TextProvider> = match kind {
            ProviderKind::OpenAi => self.openai.as_ref().map(|c| c as &dyn TextProvider),
            ProviderKind::Anthropic => self.anthropic.as_ref().map(|c| c as &dyn TextProvider),
            ProviderKind::Gemini => self.gemini.as_ref().map(|c| c as &dyn TextProvider),
        };

        client.ok_or_else(|| {
            WorkbenchError::Config(format!(
                "No API key configured for provider '{}'",
                kind.as_str()
            ))
        })
    }

    pub fn configured_count(&self) -> usize {
        [
            self.openai.is_some(),
            self.anthropic.is_some(),
            self.gemini.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_openai_only() -> ProviderRegistry {
        let config = ProvidersConfig {
            openai_api_key: Some("test-key".to_string()),
            anthropic_api_key: None,
            gemini_api_key: None,
            request_timeout_secs: 10,
            max_tokens: 256,
            parallel_requests: 2,
        };
        ProviderRegistry::from_config(&config)
    }

    #[test]
    fn test_prefix_dispatch() {
        assert_eq!(
            ProviderKind::for_model("gpt-4o-mini"),
            Some(ProviderKind::OpenAi)
        );
        assert_eq!(
            ProviderKind::for_model("claude-3-5-sonnet-latest"),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(
            ProviderKind::for_model("gemini-1.5-pro"),
            Some(ProviderKind::Gemini)
        );
        assert_eq!(ProviderKind::for_model("llama-3"), None);
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        assert_eq!(
            ProviderKind::for_model("Claude-3-Haiku"),
            Some(ProviderKind::Anthropic)
        );
    }

    #[test]
    fn test_registry_rejects_unknown_model() {
        let registry = registry_with_openai_only();
        assert!(matches!(
            registry.client_for("llama-3"),
            Err(WorkbenchError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_registry_rejects_unconfigured_provider() {
        let registry = registry_with_openai_only();
        assert!(registry.client_for("gpt-4o").is_ok());
        assert!(matches!(
            registry.client_for("claude-3-5-sonnet"),
            Err(WorkbenchError::Config(_))
        ));
        assert_eq!(registry.configured_count(), 1);
    }
}
