// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod entities;
pub mod evaluation;
pub mod rubric;

pub use entities::{EntityCategory, ExtractedEntities, VerificationStatus};
pub use evaluation::{EvaluationRecord, ModelResponse, VerifiableEntity};
pub use rubric::{RubricScore, Severity, DEFAULT_CATEGORIES};
