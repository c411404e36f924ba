//! Feature Encoder
//!
//! Turns observations into fixed-width vectors:
//! `[battery_temp, ambient_temp, hour_of_day, one-hot(device_state)...]`.
//!
//! The encoder only exists in fitted form. The vocabulary is captured once
//! by [`FeatureEncoder::fit`] and reused, unchanged, for every transform.

use std::collections::BTreeSet;

use ndarray::{aview1, Array2};

use super::layout::{FeatureLayout, NUMERIC_FEATURE_COUNT};
use super::vector::FeatureVector;

// ============================================================================
// FEATURE SOURCE
// ============================================================================

/// Anything that can be encoded (live observations and historical rows)
pub trait FeatureSource {
    fn battery_temp(&self) -> f64;
    fn ambient_temp(&self) -> f64;
    /// `None` encodes as 0
    fn hour_of_day(&self) -> Option<u8>;
    fn device_state(&self) -> &str;
}

// ============================================================================
// ENCODER
// ============================================================================

/// One-hot encoder fitted on the historical device-state vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    /// Sorted, deduplicated
    categories: Vec<String>,
    layout: FeatureLayout,
}

impl FeatureEncoder {
    /// Capture the device-state vocabulary from training samples
    pub fn fit<S: FeatureSource>(samples: &[S]) -> Self {
        Self::from_categories(samples.iter().map(|s| s.device_state().to_string()))
    }

    /// Build from an explicit vocabulary (order and duplicates don't matter)
    pub fn from_categories<I, T>(categories: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let categories: Vec<String> = categories
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let layout = FeatureLayout::new(&categories);

        Self { categories, layout }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Encode one sample. Unknown categories leave every indicator at 0.
    pub fn transform<S: FeatureSource + ?Sized>(&self, sample: &S) -> FeatureVector {
        let mut vector = FeatureVector::zeroed(&self.layout);

        vector.set(0, sample.battery_temp());
        vector.set(1, sample.ambient_temp());
        vector.set(2, sample.hour_of_day().map(f64::from).unwrap_or(0.0));

        if let Some(i) = self.category_index(sample.device_state()) {
            vector.set(NUMERIC_FEATURE_COUNT + i, 1.0);
        }

        vector
    }

    /// Encode many samples into a row-major design matrix
    pub fn transform_batch<S: FeatureSource>(&self, samples: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((samples.len(), self.width()));

        for (mut row, sample) in matrix.rows_mut().into_iter().zip(samples) {
            let vector = self.transform(sample);
            row.assign(&aview1(vector.as_slice()));
        }

        matrix
    }

    fn category_index(&self, state: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(state))
            .ok()
    }
}
