//! ThermoSense Core - Battery Health Advisory Engine
//!
//! Trains once from a historical dataset, then turns live thermal readings
//! into a classified alert with advice.

pub mod constants;
pub mod logic;

pub use logic::advisory::{AdvisoryComposer, AdvisoryResult, AdvisoryService};
pub use logic::alert::AlertLevel;
pub use logic::config::{EngineConfig, EnhanceConfig};
pub use logic::error::StartupError;
pub use logic::observation::{Clock, FixedClock, LocalClock, Observation};
pub use logic::scoring::{ModelInfo, ScoringContext, TrainingConfig};
