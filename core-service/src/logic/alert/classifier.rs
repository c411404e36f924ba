//! Alert Classifier
//!
//! Input: battery temperature, predicted impact, warn/danger cutoffs
//! Output: AlertLevel

use super::rules::AlertRules;
use super::types::{AlertLevel, ClassificationResult};

/// Classify with the default temperature limits
pub fn classify(battery_temp: f64, impact: f64, warn: f64, danger: f64) -> AlertLevel {
    classify_with_rules(battery_temp, impact, warn, danger, &AlertRules::default())
}

/// Classify with custom temperature limits
pub fn classify_with_rules(
    battery_temp: f64,
    impact: f64,
    warn: f64,
    danger: f64,
    rules: &AlertRules,
) -> AlertLevel {
    if battery_temp >= rules.danger_temp_c || impact >= danger {
        return AlertLevel::Danger;
    }
    if battery_temp >= rules.warning_temp_c || impact >= warn {
        return AlertLevel::Warning;
    }
    AlertLevel::Safe
}

/// Same decision, with every trigger that fired at the chosen level
pub fn explain_classification(
    battery_temp: f64,
    impact: f64,
    warn: f64,
    danger: f64,
    rules: &AlertRules,
) -> ClassificationResult {
    let alert_level = classify_with_rules(battery_temp, impact, warn, danger, rules);
    let mut reasons = Vec::new();

    let (temp_limit, impact_limit) = match alert_level {
        AlertLevel::Danger => (rules.danger_temp_c, danger),
        AlertLevel::Warning => (rules.warning_temp_c, warn),
        AlertLevel::Safe => return ClassificationResult::default(),
    };

    if battery_temp >= temp_limit {
        reasons.push(format!("Battery at {:.1} °C (limit {:.1} °C)", battery_temp, temp_limit));
    }
    if impact >= impact_limit {
        reasons.push(format!("Predicted impact {:.3} >= {:.3}", impact, impact_limit));
    }

    ClassificationResult { alert_level, reasons }
}
