//! Alert Types
//!
//! Data only; the decision lives in `classifier`.

use serde::{Deserialize, Serialize};

// ============================================================================
// ALERT LEVEL
// ============================================================================

/// Alert levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Normal operation
    Safe,
    /// Elevated, reduce load and monitor
    Warning,
    /// Critical, cool the device now
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Safe => "safe",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }

    /// Warning and danger always carry an action
    pub fn requires_action(&self) -> bool {
        !matches!(self, AlertLevel::Safe)
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

/// Level plus the triggers that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub alert_level: AlertLevel,
    pub reasons: Vec<String>,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            alert_level: AlertLevel::Safe,
            reasons: vec![],
        }
    }
}
