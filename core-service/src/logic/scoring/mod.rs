//! Scoring Module - Fitted State & Per-Request Pipeline
//!
//! `training` fits encoder, forest and thresholds once from the historical
//! dataset. `context` wraps the result in an immutable `ScoringContext`
//! that request handlers share behind `Arc`.
//!
//! Per request: observation -> encode -> predict -> classify -> advise.

pub mod training;
pub mod context;


pub use training::{train, TrainedModel, TrainingConfig, TrainingReport};
pub use context::{ModelInfo, Scored, ScoringContext};
