//! Alert Module
//!
//! Maps (battery temperature, predicted impact, calibrated thresholds) to a
//! three-level alert. Pure and stateless; first matching rule wins.
//!
//! ## Structure
//! - `types`: AlertLevel, ClassificationResult
//! - `rules`: Temperature limits
//! - `classifier`: Decision logic
//!
//! ## Usage
//! ```ignore
//! use crate::logic::alert::{classify, AlertLevel};
//!
//! match classify(45.5, 0.75, 0.40, 0.70) {
//!     AlertLevel::Safe => println!("Normal operation"),
//!     AlertLevel::Warning => println!("Reduce load"),
//!     AlertLevel::Danger => println!("Cool down now"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;

pub use types::{AlertLevel, ClassificationResult};
pub use rules::{AlertRules, DANGER_TEMP_C, WARNING_TEMP_C};
pub use classifier::{classify, classify_with_rules, explain_classification};
