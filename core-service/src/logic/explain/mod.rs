//! Explain Module - Feature importance report for the trained model

pub mod types;
pub mod engine;

pub use types::{FeatureContribution, ModelExplanation};
pub use engine::explain_model;
