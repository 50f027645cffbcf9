// file: src/extractor/mod.rs
// description: entity extraction module exports
// reference: internal module structure

pub mod digits;
pub mod entities;
pub mod patterns;

pub use digits::normalize_digits;
pub use entities::{analyze, EntityExtractor};
