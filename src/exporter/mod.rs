// file: src/exporter/mod.rs
// description: export module exports
// reference: internal module structure

pub mod csv;

pub use csv::{CsvExporter, CsvRow, ExportManifest};
