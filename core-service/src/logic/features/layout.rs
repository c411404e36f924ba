//! Feature Layout - Fitted Feature Schema
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Numeric columns come first, in `NUMERIC_FEATURES` order
//! 2. One-hot columns for `device_state` follow, in the order captured at fit
//! 3. Add / reorder / remove a numeric column → increment FEATURE_VERSION
//!
//! The layout hash covers the version and every column name, so a vector
//! produced by one fitted encoder is rejected by an encoder fitted on a
//! different vocabulary.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when the numeric columns change
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FIXED COLUMNS
// ============================================================================

/// Numeric features in exact order they appear in the vector
pub const NUMERIC_FEATURES: &[&str] = &[
    "battery_temp",  // 0: Battery temperature (°C)
    "ambient_temp",  // 1: Ambient temperature (°C)
    "hour_of_day",   // 2: Local hour 0-23
];

/// Number of numeric features
/// IMPORTANT: Must match NUMERIC_FEATURES.len()!
pub const NUMERIC_FEATURE_COUNT: usize = 3;

/// Prefix of the one-hot columns
pub const DEVICE_STATE_PREFIX: &str = "device_state";

/// Column name for one device-state category
pub fn one_hot_column(category: &str) -> String {
    format!("{}_{}", DEVICE_STATE_PREFIX, category)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a feature layout
pub fn compute_layout_hash(version: u8, columns: &[String]) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in columns {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Column schema of a fitted encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    version: u8,
    hash: u32,
    columns: Vec<String>,
}

impl FeatureLayout {
    /// Build the layout for an ordered device-state vocabulary
    pub fn new(categories: &[String]) -> Self {
        let columns: Vec<String> = NUMERIC_FEATURES
            .iter()
            .map(|s| s.to_string())
            .chain(categories.iter().map(|c| one_hot_column(c)))
            .collect();

        Self {
            version: FEATURE_VERSION,
            hash: compute_layout_hash(FEATURE_VERSION, &columns),
            columns,
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total vector width
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Validate that incoming data matches this layout
    pub fn validate(&self, incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
        if incoming_version != self.version || incoming_hash != self.hash {
            return Err(LayoutMismatchError {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: incoming_version,
                actual_hash: incoming_hash,
            });
        }

        Ok(())
    }

    /// Serializable summary for logs and the model endpoint
    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.hash,
            feature_count: self.width(),
            feature_names: self.columns.clone(),
        }
    }
}

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

// ============================================================================
// TESTS
// ============================================================================
