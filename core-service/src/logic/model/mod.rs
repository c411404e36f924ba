//! Model Module - Impact Regression & Calibration
//!
//! Random forest regressor for the health-impact score, the percentile
//! threshold calibrator, and hold-out evaluation. Everything here is fitted
//! once at startup and read-only afterwards.

pub mod tree;
pub mod forest;
pub mod inference;
pub mod threshold;
pub mod evaluation;

#[cfg(test)]
mod tests;

// Re-export common types
pub use forest::{ForestParams, RandomForest, TrainingError};
pub use inference::{EngineStatus, ImpactRegressor, InferenceStats, PredictionResult};
pub use threshold::{percentile, CalibratedThresholds, CalibrationError, ThresholdConfig};
pub use evaluation::{HoldoutMetrics, Split};
