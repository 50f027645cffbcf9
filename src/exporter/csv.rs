// file: src/exporter/csv.rs
// description: csv export and import for evaluation records
// reference: one row per (record, model response)

use crate::error::{Result, WorkbenchError};
use crate::extractor::analyze;
use crate::models::{EvaluationRecord, ModelResponse, RubricScore, VerifiableEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct CsvRow {
    pub record_id: String,
    pub created_at: String,
    pub language: String,
    pub prompt_en: String,
    pub prompt_native: String,
    pub model: String,
    pub provider: String,
    pub response_language: String,
    pub response: String,
    pub error: String,
    pub links_count: usize,
    pub emails_count: usize,
    pub phones_count: usize,
    pub addresses_count: usize,
    /// Scores flattened as "category=severity" pairs joined with ';'
    pub scores: String,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_records: usize,
    pub total_rows: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn export(&self, records: &[EvaluationRecord]) -> Result<ExportManifest> {
        info!("Starting CSV export to {:?}", self.output_dir);

        let file_name = format!("evaluations-{}.csv", Utc::now().format("%Y%m%d-%H%M%S"));
        let path = self.output_dir.join(&file_name);
        let mut writer = csv::Writer::from_path(&path)?;

        let mut total_rows = 0;
        for record in records {
            for response in &record.responses {
                writer.serialize(flatten_row(record, response))?;
                total_rows += 1;
            }
        }
        writer.flush()?;

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_records: records.len(),
            total_rows,
            files: vec![file_name],
        };

        info!(
            "Export complete: {} records, {} rows",
            manifest.total_records, manifest.total_rows
        );
        Ok(manifest)
    }

    /// Rebuilds records from exported rows. Entity lists and checklists are
    /// re-derived from the response text; score notes and verification
    /// statuses are not round-tripped through CSV.
    pub fn import(path: &Path) -> Result<Vec<EvaluationRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records: Vec<EvaluationRecord> = Vec::new();

        for row in reader.deserialize() {
            let row: CsvRow = row?;

            if !records.iter().any(|r| r.id == row.record_id) {
                records.push(record_from_row(&row)?);
            }
            let record = records
                .iter_mut()
                .find(|r| r.id == row.record_id)
                .ok_or_else(|| WorkbenchError::Export("Record lookup failed".to_string()))?;

            record.responses.push(response_from_row(&row)?);
        }

        info!("Imported {} records from {:?}", records.len(), path);
        Ok(records)
    }
}

fn flatten_row(record: &EvaluationRecord, response: &ModelResponse) -> CsvRow {
    let scores = response
        .scores
        .iter()
        .map(|s| format!("{}={}", s.category, s.severity))
        .collect::<Vec<_>>()
        .join(";");

    CsvRow {
        record_id: record.id.clone(),
        created_at: record.created_at_rfc3339(),
        language: record.language.clone(),
        prompt_en: record.prompt_en.clone(),
        prompt_native: record.prompt_native.clone().unwrap_or_default(),
        model: response.model.clone(),
        provider: response.provider.clone(),
        response_language: response.language.clone(),
        response: response.text.clone(),
        error: response.error.clone().unwrap_or_default(),
        links_count: response.entities.links_count,
        emails_count: response.entities.emails_count,
        phones_count: response.entities.phones_count,
        addresses_count: response.entities.addresses_count,
        scores,
    }
}

fn record_from_row(row: &CsvRow) -> Result<EvaluationRecord> {
    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
        .map_err(|e| WorkbenchError::Export(format!("Invalid created_at timestamp: {}", e)))?
        .timestamp()
        .max(0) as u64;

    Ok(EvaluationRecord {
        id: row.record_id.clone(),
        created_at,
        prompt_en: row.prompt_en.clone(),
        prompt_native: if row.prompt_native.is_empty() {
            None
        } else {
            Some(row.prompt_native.clone())
        },
        language: row.language.clone(),
        responses: Vec::new(),
    })
}

fn response_from_row(row: &CsvRow) -> Result<ModelResponse> {
    let entities = analyze(&row.response);
    let checklist = VerifiableEntity::seed_from(&entities);
    let scores = parse_scores(&row.scores)?;

    Ok(ModelResponse {
        model: row.model.clone(),
        provider: row.provider.clone(),
        language: row.response_language.clone(),
        text: row.response.clone(),
        error: if row.error.is_empty() {
            None
        } else {
            Some(row.error.clone())
        },
        latency_ms: 0,
        entities,
        checklist,
        scores,
    })
}

fn parse_scores(flattened: &str) -> Result<Vec<RubricScore>> {
    if flattened.is_empty() {
        return Ok(Vec::new());
    }

    let mut scores = Vec::new();
    for pair in flattened.split(';') {
        let (category, severity) = pair.split_once('=').ok_or_else(|| {
            WorkbenchError::Export(format!("Malformed score entry '{}'", pair))
        })?;
        let severity: u8 = severity
            .parse()
            .map_err(|e| WorkbenchError::Export(format!("Invalid severity '{}': {}", severity, e)))?;
        scores.push(RubricScore {
            category: category.to_string(),
            severity,
            note: None,
        });
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractedEntities;
    use tempfile::tempdir;

    fn sample_record() -> EvaluationRecord {
        let mut record =
            EvaluationRecord::new("Find help lines".to_string(), None, "fa".to_string());
        let text = "Call 555-123-4567 or mail help@example.org".to_string();
        let entities = analyze(&text);
        record.responses.push(ModelResponse {
            model: "gpt-4o".to_string(),
            provider: "openai".to_string(),
            language: "en".to_string(),
            text,
            error: None,
            latency_ms: 42,
            entities: entities.clone(),
            checklist: VerifiableEntity::seed_from(&entities),
            scores: vec![RubricScore {
                category: "identification".to_string(),
                severity: 2,
                note: Some("dropped in csv".to_string()),
            }],
        });
        record.responses.push(ModelResponse {
            model: "claude-3-5-sonnet".to_string(),
            provider: "anthropic".to_string(),
            language: "en".to_string(),
            text: String::new(),
            error: Some("timeout".to_string()),
            latency_ms: 60_000,
            entities: ExtractedEntities::default(),
            checklist: vec![],
            scores: vec![],
        });
        record
    }

    #[test]
    fn test_export_row_per_response() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();

        let manifest = exporter.export(&[sample_record()]).unwrap();
        assert_eq!(manifest.total_records, 1);
        assert_eq!(manifest.total_rows, 2);
        assert_eq!(manifest.files.len(), 1);
        assert!(dir.path().join(&manifest.files[0]).exists());
    }

    #[test]
    fn test_import_round_trips_counts() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let original = sample_record();

        let manifest = exporter.export(&[original.clone()]).unwrap();
        let imported = CsvExporter::import(&dir.path().join(&manifest.files[0])).unwrap();

        assert_eq!(imported.len(), 1);
        let record = &imported[0];
        assert_eq!(record.id, original.id);
        assert_eq!(record.responses.len(), 2);

        let ok_response = record
            .responses
            .iter()
            .find(|r| r.model == "gpt-4o")
            .unwrap();
        assert_eq!(ok_response.entities.phones_count, 1);
        assert_eq!(ok_response.entities.emails_count, 1);
        assert_eq!(ok_response.scores.len(), 1);
        assert_eq!(ok_response.scores[0].severity, 2);

        let failed = record
            .responses
            .iter()
            .find(|r| r.model == "claude-3-5-sonnet")
            .unwrap();
        assert_eq!(failed.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_parse_scores_rejects_garbage() {
        assert!(parse_scores("surveillance=2;misinformation=0").is_ok());
        assert!(parse_scores("no-equals-sign").is_err());
        assert!(parse_scores("surveillance=nine").is_err());
    }
}
