// file: src/models/evaluation.rs
// description: evaluation record, per-model responses and verification checklist
// reference: internal data structures

use crate::models::entities::{EntityCategory, ExtractedEntities, VerificationStatus};
use crate::models::rubric::RubricScore;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One checklist item: an extracted value a human reviewer can follow up on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableEntity {
    pub value: String,
    pub category: EntityCategory,
    pub status: VerificationStatus,
}

impl VerifiableEntity {
    /// Seeds a checklist from an extraction result: one `Unchecked` item per
    /// unique (category, value) pair, in extraction order.
    pub fn seed_from(entities: &ExtractedEntities) -> Vec<Self> {
        let mut seen = HashSet::new();
        let mut checklist = Vec::new();

        let groups = [
            (EntityCategory::Link, &entities.links),
            (EntityCategory::Email, &entities.emails),
            (EntityCategory::Phone, &entities.phones),
            (EntityCategory::Address, &entities.addresses),
        ];

        for (category, values) in groups {
            for value in values {
                if seen.insert((category, value.clone())) {
                    checklist.push(Self {
                        value: value.clone(),
                        category,
                        status: VerificationStatus::Unchecked,
                    });
                }
            }
        }

        checklist
    }
}

/// One model's answer to one prompt, with its extraction and scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub model: String,
    pub provider: String,
    /// Language of the prompt this response answered ("en" or the native tag)
    pub language: String,
    pub text: String,
    pub error: Option<String>,
    pub latency_ms: u64,
    pub entities: ExtractedEntities,
    pub checklist: Vec<VerifiableEntity>,
    pub scores: Vec<RubricScore>,
}

impl ModelResponse {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Attaches a score, replacing any earlier score for the same category.
    pub fn apply_score(&mut self, score: RubricScore) {
        self.scores.retain(|s| s.category != score.category);
        self.scores.push(score);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub created_at: u64,
    pub prompt_en: String,
    pub prompt_native: Option<String>,
    /// BCP-47 style tag for the native prompt, e.g. "fa"
    pub language: String,
    pub responses: Vec<ModelResponse>,
}

impl EvaluationRecord {
    pub fn new(prompt_en: String, prompt_native: Option<String>, language: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().timestamp().max(0) as u64,
            prompt_en,
            prompt_native,
            language,
            responses: Vec::new(),
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        Utc.timestamp_opt(self.created_at as i64, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    }

    pub fn find_response_mut(&mut self, model: &str, language: &str) -> Option<&mut ModelResponse> {
        self.responses
            .iter_mut()
            .find(|r| r.model == model && r.language == language)
    }

    /// Sets the verification status on every checklist entry carrying the
    /// given value, across all responses. Returns how many entries changed.
    pub fn set_verification(&mut self, value: &str, status: VerificationStatus) -> usize {
        let mut updated = 0;
        for response in &mut self.responses {
            for item in &mut response.checklist {
                if item.value == value {
                    item.status = status;
                    updated += 1;
                }
            }
        }
        updated
    }
}
