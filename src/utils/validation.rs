// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{Result, WorkbenchError};
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            WorkbenchError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(WorkbenchError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_text_not_empty(text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(WorkbenchError::Validation("Text is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_model_id(model: &str) -> Result<()> {
        if model.trim().is_empty() || model.contains(char::is_whitespace) {
            return Err(WorkbenchError::Validation(format!(
                "Invalid model identifier: '{}'",
                model
            )));
        }
        Ok(())
    }

    pub fn validate_severity(severity: u8) -> Result<()> {
        if severity > 3 {
            return Err(WorkbenchError::Validation(format!(
                "Severity must be 0-3, got {}",
                severity
            )));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let prefix: String = text.chars().take(max_chars).collect();
            format!("{}...", prefix)
        }
    }
}
