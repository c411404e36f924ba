//! Dataset Module - Historical Training Data
//!
//! Loads the labeled history (CSV) that the encoder, forest and thresholds
//! are fitted on. Read once at startup; immutable afterwards.
//!
//! Rows that fail to parse are skipped and counted. A dataset with no usable
//! rows is a startup error.

pub mod record;
pub mod loader;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use thiserror::Error;

pub use record::{parse_timestamp, HistoricalRecord};
pub use loader::REQUIRED_COLUMNS;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("dataset has no usable rows ({skipped} skipped)")]
    NoUsableRows { skipped: usize },
}

// ============================================================================
// DATASET
// ============================================================================

/// Immutable, ordered set of labeled observations
#[derive(Debug, Clone)]
pub struct HistoricalDataset {
    records: Vec<HistoricalRecord>,
    skipped: usize,
    source: Option<PathBuf>,
}

impl HistoricalDataset {
    /// Wrap already validated records (must be non-empty)
    pub fn from_records(records: Vec<HistoricalRecord>) -> Result<Self, DatasetError> {
        Self::new(records, 0, None)
    }

    pub(crate) fn new(
        records: Vec<HistoricalRecord>,
        skipped: usize,
        source: Option<PathBuf>,
    ) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::NoUsableRows { skipped });
        }

        Ok(Self { records, skipped, source })
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped while loading
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// Target column, in row order
    pub fn targets(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.measured_health_impact).collect()
    }
}
