//! Alert Rules
//!
//! Fixed temperature limits. Impact cutoffs come from calibration, not here.

use serde::{Deserialize, Serialize};

// ============================================================================
// TEMPERATURE LIMITS (°C, inclusive)
// ============================================================================

/// At or above this battery temperature = Danger
pub const DANGER_TEMP_C: f64 = 50.0;

/// At or above this battery temperature = Warning
pub const WARNING_TEMP_C: f64 = 40.0;

/// Temperature limits as a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertRules {
    pub danger_temp_c: f64,
    pub warning_temp_c: f64,
}

impl Default for AlertRules {
    fn default() -> Self {
        Self {
            danger_temp_c: DANGER_TEMP_C,
            warning_temp_c: WARNING_TEMP_C,
        }
    }
}
