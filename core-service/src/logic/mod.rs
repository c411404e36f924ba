//! Logic Module - Advisory Engine
//!
//! ## Pipeline
//! - `dataset/` - Historical CSV (training data)
//! - `features/` - Observation -> feature vector (fitted one-hot encoder)
//! - `model/` - Random forest regressor, threshold calibration, evaluation
//! - `alert/` - (temperature, impact) -> safe / warning / danger
//! - `advisory/` - Tip & action text (template + optional enhancement)
//! - `scoring/` - Immutable fitted context shared by request handlers
//!
//! ## Support
//! - `sensors` - Host battery/CPU snapshot
//! - `explain/` - Feature importance report

// Inputs
pub mod observation;
pub mod dataset;

// Pipeline
pub mod features;
pub mod model;
pub mod alert;
pub mod advisory;
pub mod scoring;

// Support
pub mod config;
pub mod error;
pub mod explain;
pub mod sensors;
