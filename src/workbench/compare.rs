// file: src/workbench/compare.rs
// description: concurrent prompt fan-out across providers and record assembly
// reference: bounded buffer_unordered over (model, prompt) pairs

use crate::config::Config;
use crate::error::{Result, WorkbenchError};
use crate::extractor::EntityExtractor;
use crate::models::{EvaluationRecord, ExtractedEntities, ModelResponse, VerifiableEntity};
use crate::providers::{ProviderKind, ProviderRegistry};
use crate::workbench::progress::{ComparisonStats, ProgressTracker};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub prompt_en: String,
    pub prompt_native: Option<String>,
    /// Language tag of the native prompt, e.g. "fa"
    pub language: String,
    pub models: Vec<String>,
    pub system_instruction: Option<String>,
}

pub struct Workbench {
    registry: Arc<ProviderRegistry>,
    extractor: EntityExtractor,
    config: Config,
}

impl Workbench {
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(ProviderRegistry::from_config(&config.providers));
        Self {
            registry,
            extractor: EntityExtractor::new(),
            config,
        }
    }

    /// Queries every model with the English prompt and, when present, the
    /// native prompt, concurrently. A failing provider call becomes a
    /// per-response error; it never aborts the sibling queries.
    pub async fn compare(
        &self,
        request: ComparisonRequest,
    ) -> Result<(EvaluationRecord, ComparisonStats)> {
        if request.models.is_empty() {
            return Err(WorkbenchError::Validation(
                "At least one model is required".to_string(),
            ));
        }
        if request.prompt_en.trim().is_empty() {
            return Err(WorkbenchError::Validation(
                "English prompt must not be empty".to_string(),
            ));
        }

        let mut record = EvaluationRecord::new(
            request.prompt_en.clone(),
            request.prompt_native.clone(),
            request.language.clone(),
        );

        let mut tasks: Vec<(String, String, String)> = Vec::new();
        for model in &request.models {
            tasks.push((model.clone(), "en".to_string(), request.prompt_en.clone()));
            if let Some(native) = &request.prompt_native {
                tasks.push((model.clone(), request.language.clone(), native.clone()));
            }
        }

        info!(
            "Comparing {} models over {} prompt(s)",
            request.models.len(),
            if request.prompt_native.is_some() { 2 } else { 1 }
        );

        let progress = Arc::new(ProgressTracker::new(tasks.len()));
        let parallel = self.config.providers.parallel_requests.max(1);

        let outcomes = stream::iter(tasks.into_iter().map(|(model, language, prompt)| {
            let registry = Arc::clone(&self.registry);
            let system = request.system_instruction.clone();

            async move {
                let started = Instant::now();
                let outcome = match registry.client_for(&model) {
                    Ok(client) => client.generate(&model, &prompt, system.as_deref()).await,
                    Err(e) => Err(e),
                };
                let latency_ms = started.elapsed().as_millis() as u64;
                (model, language, outcome, latency_ms)
            }
        }))
        .buffer_unordered(parallel)
        .collect::<Vec<_>>()
        .await;

        for (model, language, outcome, latency_ms) in outcomes {
            let provider = ProviderKind::for_model(&model)
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let response = match outcome {
                Ok(text) => {
                    let text = truncate_chars(&text, self.config.extraction.max_response_chars);
                    let entities = self.extractor.extract(&text);
                    let checklist = if self.config.extraction.seed_checklist {
                        VerifiableEntity::seed_from(&entities)
                    } else {
                        Vec::new()
                    };

                    progress.inc_completed();
                    progress.add_entities(entities.total());

                    ModelResponse {
                        model,
                        provider,
                        language,
                        text,
                        error: None,
                        latency_ms,
                        entities,
                        checklist,
                        scores: Vec::new(),
                    }
                }
                Err(e) => {
                    warn!("Query failed for {} ({}): {}", model, language, e);
                    progress.inc_failed();

                    ModelResponse {
                        model,
                        provider,
                        language,
                        text: String::new(),
                        error: Some(e.to_string()),
                        latency_ms,
                        entities: ExtractedEntities::default(),
                        checklist: Vec::new(),
                        scores: Vec::new(),
                    }
                }
            };

            record.responses.push(response);
        }

        // buffer_unordered scrambles completion order
        record
            .responses
            .sort_by(|a, b| a.model.cmp(&b.model).then(a.language.cmp(&b.language)));

        let stats = progress.get_stats();
        progress.finish();

        Ok((record, stats))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Config {
        // No API keys, so every provider call fails fast.
        Config::default_config()
    }

    fn request(models: &[&str]) -> ComparisonRequest {
        ComparisonRequest {
            prompt_en: "Where can activists report abuses?".to_string(),
            prompt_native: Some("فعالان کجا می‌توانند گزارش دهند؟".to_string()),
            language: "fa".to_string(),
            models: models.iter().map(|m| m.to_string()).collect(),
            system_instruction: None,
        }
    }

    #[tokio::test]
    async fn test_empty_model_list_rejected() {
        let workbench = Workbench::new(offline_config());
        let result = workbench.compare(request(&[])).await;
        assert!(matches!(result, Err(WorkbenchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_failures_recorded_per_response() {
        let workbench = Workbench::new(offline_config());
        let (record, stats) = workbench
            .compare(request(&["gpt-4o", "claude-3-5-sonnet"]))
            .await
            .unwrap();

        // Two models, two prompt languages each.
        assert_eq!(record.responses.len(), 4);
        assert!(record.responses.iter().all(|r| !r.succeeded()));
        assert!(record.responses.iter().all(|r| r.entities.is_empty()));
        assert_eq!(stats.queries_failed, 4);
        assert_eq!(stats.queries_completed, 0);
    }

    #[tokio::test]
    async fn test_unknown_model_does_not_abort_siblings() {
        let workbench = Workbench::new(offline_config());
        let (record, _) = workbench
            .compare(request(&["llama-3", "gpt-4o"]))
            .await
            .unwrap();

        assert_eq!(record.responses.len(), 4);
        let unknown: Vec<_> = record
            .responses
            .iter()
            .filter(|r| r.model == "llama-3")
            .collect();
        assert_eq!(unknown.len(), 2);
        assert!(unknown.iter().all(|r| r.provider == "unknown"));
    }

    #[tokio::test]
    async fn test_responses_sorted_deterministically() {
        let workbench = Workbench::new(offline_config());
        let (record, _) = workbench
            .compare(request(&["gpt-4o", "claude-3-5-sonnet"]))
            .await
            .unwrap();

        let order: Vec<_> = record
            .responses
            .iter()
            .map(|r| (r.model.as_str(), r.language.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("claude-3-5-sonnet", "en"),
                ("claude-3-5-sonnet", "fa"),
                ("gpt-4o", "en"),
                ("gpt-4o", "fa"),
            ]
        );
    }

    #[test]
    fn test_truncate_chars_is_boundary_safe() {
        assert_eq!(truncate_chars("سلام دنیا", 4), "سلام");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
