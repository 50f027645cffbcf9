// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod providers;
pub mod store;
pub mod utils;
pub mod workbench;

pub use config::{Config, ExtractionConfig, ProvidersConfig, RubricConfig, StorageConfig};
pub use error::{Result, WorkbenchError};
pub use exporter::{CsvExporter, ExportManifest};
pub use extractor::{analyze, normalize_digits, EntityExtractor};
pub use models::{
    EntityCategory, EvaluationRecord, ExtractedEntities, ModelResponse, RubricScore,
    VerifiableEntity, VerificationStatus,
};
pub use providers::{ProviderKind, ProviderRegistry, TextProvider};
pub use store::{EvaluationStore, JsonFileStore, KeyValueStore, MemoryStore};
pub use utils::Validator;
pub use workbench::{ComparisonRequest, ComparisonStats, Workbench};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _extractor = EntityExtractor::new();
    }
}
