//! Threshold Calibration
//!
//! Derives the warning/danger impact cutoffs from the empirical distribution
//! of the historical target column. Computed once at startup; immutable after.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_DANGER_PERCENTILE, DEFAULT_WARN_PERCENTILE};

/// Which percentiles become the cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Percentile (0-100) that starts the warning band
    pub warn_percentile: f64,

    /// Percentile (0-100) that starts the danger band
    pub danger_percentile: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            warn_percentile: DEFAULT_WARN_PERCENTILE,
            danger_percentile: DEFAULT_DANGER_PERCENTILE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("cannot calibrate thresholds from an empty target column")]
    EmptyTargets,

    #[error("percentile {0} is outside 0..=100")]
    InvalidPercentile(f64),

    #[error("warn percentile {warn} is above danger percentile {danger}")]
    InvertedPercentiles { warn: f64, danger: f64 },
}

/// Impact cutoffs, inclusive lower bounds of each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibratedThresholds {
    warn: f64,
    danger: f64,
}

impl CalibratedThresholds {
    /// Default percentiles (75th / 90th)
    pub fn calibrate(targets: &[f64]) -> Result<Self, CalibrationError> {
        Self::calibrate_with(targets, &ThresholdConfig::default())
    }

    pub fn calibrate_with(targets: &[f64], config: &ThresholdConfig) -> Result<Self, CalibrationError> {
        for pct in [config.warn_percentile, config.danger_percentile] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(CalibrationError::InvalidPercentile(pct));
            }
        }

        // Percentiles are monotone, so ordered inputs keep danger >= warn
        if config.warn_percentile > config.danger_percentile {
            return Err(CalibrationError::InvertedPercentiles {
                warn: config.warn_percentile,
                danger: config.danger_percentile,
            });
        }

        let warn = percentile(targets, config.warn_percentile).ok_or(CalibrationError::EmptyTargets)?;
        let danger = percentile(targets, config.danger_percentile).ok_or(CalibrationError::EmptyTargets)?;

        log::info!("Impact thresholds: warn >= {:.3}, danger >= {:.3}", warn, danger);

        Ok(Self { warn, danger })
    }

    /// Fixed cutoffs (tests, replays)
    pub fn from_values(warn: f64, danger: f64) -> Self {
        Self { warn, danger }
    }

    pub fn warn(&self) -> f64 {
        self.warn
    }

    pub fn danger(&self) -> f64 {
        self.danger
    }
}

/// Percentile with linear interpolation between closest ranks.
///
/// Position is `pct/100 * (n-1)` over the ascending values. `None` when the
/// input is empty.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}
