//! Diff classification: record types and the engine contract

pub mod engine;
pub mod types;

pub use engine::{summarize, DiffEngine, DiffSummary, EngineConfig, HashDiffEngine};
pub use types::{DiffRecord, DiffStatus};
