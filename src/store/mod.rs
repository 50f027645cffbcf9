// file: src/store/mod.rs
// description: persistence module exports
// reference: internal module structure

pub mod evaluations;
pub mod kv;

pub use evaluations::EvaluationStore;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
