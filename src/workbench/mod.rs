// file: src/workbench/mod.rs
// description: comparison workbench module exports
// reference: internal module structure

pub mod compare;
pub mod progress;

pub use compare::{ComparisonRequest, Workbench};
pub use progress::{ComparisonStats, ProgressTracker};
