//! Inference - Regressor Seam & Runtime Stats
//!
//! The scoring context talks to its model only through `ImpactRegressor`,
//! so the forest can be swapped for a fixed-output model in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

// ============================================================================
// REGRESSOR TRAIT
// ============================================================================

/// Trained function: feature vector -> predicted health impact
pub trait ImpactRegressor: Send + Sync {
    fn predict(&self, features: &[f64]) -> f64;

    /// Short identifier reported in predictions and status
    fn name(&self) -> &str;

    /// Normalized importances in layout order, if the model has them
    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }

    /// Ensemble size (1 for single models)
    fn size(&self) -> usize {
        1
    }
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PredictionResult {
    /// Raw predicted impact (unbounded)
    pub score: f64,
    pub inference_time_us: u64,
    pub method: String,
}

/// Engine status for the model endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

// ============================================================================
// STATS
// ============================================================================

/// Latency counters. Read-only for scoring; never influence a prediction.
#[derive(Debug, Default)]
pub struct InferenceStats {
    latency_sum_us: AtomicU64,
    count: AtomicU64,
}

impl InferenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, latency_us: u64) {
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn avg_latency_ms(&self) -> f32 {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.count();
        if count > 0 {
            (sum as f32 / count as f32) / 1000.0
        } else {
            0.0
        }
    }

    pub fn status(&self, model_name: &str) -> EngineStatus {
        EngineStatus {
            model_loaded: true,
            model_name: model_name.to_string(),
            avg_latency_ms: self.avg_latency_ms(),
            inference_count: self.count(),
        }
    }
}

/// Run one prediction and track its latency
pub fn predict_timed(
    regressor: &dyn ImpactRegressor,
    features: &[f64],
    stats: &InferenceStats,
) -> PredictionResult {
    let start = Instant::now();
    let score = regressor.predict(features);
    let inference_time_us = start.elapsed().as_micros() as u64;

    stats.record(inference_time_us);

    PredictionResult {
        score,
        inference_time_us,
        method: regressor.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl ImpactRegressor for Constant {
        fn predict(&self, _features: &[f64]) -> f64 {
            self.0
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_predict_timed_records_stats() {
        let stats = InferenceStats::new();
        let model = Constant(0.33);

        let result = predict_timed(&model, &[1.0, 2.0], &stats);
        predict_timed(&model, &[1.0, 2.0], &stats);

        assert_eq!(result.score, 0.33);
        assert_eq!(result.method, "constant");
        assert_eq!(stats.count(), 2);
        assert!(stats.avg_latency_ms() >= 0.0);
    }

    #[test]
    fn test_default_trait_methods() {
        let model = Constant(0.0);
        assert!(model.feature_importances().is_none());
        assert_eq!(model.size(), 1);
    }

    #[test]
    fn test_status_snapshot() {
        let stats = InferenceStats::new();
        let status = stats.status("random_forest");
        assert!(status.model_loaded);
        assert_eq!(status.inference_count, 0);
        assert_eq!(status.avg_latency_ms, 0.0);
    }
}
