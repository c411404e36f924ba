//! Startup errors
//!
//! Anything that stops the scoring context from being built. Request-time
//! paths do not fail.

use thiserror::Error;

use crate::logic::dataset::DatasetError;
use crate::logic::model::{CalibrationError, TrainingError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("threshold calibration failed: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("model training failed: {0}")]
    Training(#[from] TrainingError),
}
