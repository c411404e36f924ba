//! Advisory Types

use serde::{Deserialize, Serialize};

use crate::logic::alert::AlertLevel;

/// Everything a generator needs to write advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub battery_temp: f64,
    pub ambient_temp: f64,
    pub device_state: String,
    pub predicted_impact: f64,
    pub alert_level: AlertLevel,
}

impl AdviceRequest {
    /// Battery minus ambient (°C)
    pub fn temperature_delta(&self) -> f64 {
        self.battery_temp - self.ambient_temp
    }
}

/// Tip plus optional action, as produced by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub tip: String,
    pub action: Option<String>,
}

/// Response record for one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryResult {
    pub alert_level: AlertLevel,
    pub natural_language_tip: String,
    /// Serialized as `null` when absent
    pub optional_action: Option<String>,
    /// Rounded to 5 decimals
    pub predicted_health_impact: f64,
}

impl AdvisoryResult {
    pub fn new(alert_level: AlertLevel, advice: Advice, predicted_impact: f64) -> Self {
        Self {
            alert_level,
            natural_language_tip: advice.tip,
            optional_action: advice.action,
            predicted_health_impact: round5(predicted_impact),
        }
    }
}

/// Round to 5 decimals on the exact binary value (ties go to even)
pub fn round5(value: f64) -> f64 {
    format!("{:.5}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round5() {
        assert_eq!(round5(0.123456789), 0.12346);
        assert_eq!(round5(0.75), 0.75);
        assert_eq!(round5(-0.000004), -0.0);
    }

    #[test]
    fn test_round5_uses_stored_value() {
        // Both literals sit just below the written tie
        assert_eq!(round5(0.123455), 0.12345);
        assert_eq!(round5(0.002675), 0.00267);
    }

    #[test]
    fn test_absent_action_serializes_as_null() {
        let result = AdvisoryResult::new(
            AlertLevel::Safe,
            Advice { tip: "ok".into(), action: None },
            0.1,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["alert_level"], "safe");
        assert!(json["optional_action"].is_null());
        assert_eq!(json["predicted_health_impact"], 0.1);
    }
}
