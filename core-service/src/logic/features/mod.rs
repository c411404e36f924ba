//! Features Module - Feature Encoding Engine
//!
//! Schema, vectors and the fitted one-hot encoder.
//! Training and serving share the same encoder instance, so the column
//! order seen by the model never drifts.

pub mod layout;
pub mod vector;
pub mod encoder;


// Re-export common types
pub use layout::{FeatureLayout, LayoutInfo, LayoutMismatchError, FEATURE_VERSION, NUMERIC_FEATURES};
pub use vector::FeatureVector;
pub use encoder::{FeatureEncoder, FeatureSource};
