//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Every vector remembers the version and hash of the layout that produced
//! it, so a vector can never be fed to a model trained on another schema.

use serde::{Deserialize, Serialize};
use super::layout::{FeatureLayout, LayoutMismatchError};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in layout order
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Create a zeroed vector for a layout
    pub fn zeroed(layout: &FeatureLayout) -> Self {
        Self {
            version: layout.version(),
            layout_hash: layout.hash(),
            values: vec![0.0; layout.width()],
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Set feature by index (out of range is ignored)
    pub fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Validate that this vector is compatible with a layout
    pub fn validate(&self, layout: &FeatureLayout) -> Result<(), LayoutMismatchError> {
        layout.validate(self.version, self.layout_hash)
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, layout: &FeatureLayout) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": layout.columns().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
