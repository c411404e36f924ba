//! Template Generator
//!
//! Deterministic advice text. Always available; the fallback for every
//! enhancement failure.

use super::types::{Advice, AdviceRequest};
use crate::logic::alert::AlertLevel;

pub const DANGER_ACTION: &str = "Stop using the device and let it cool.";
pub const WARNING_ACTION: &str = "Consider giving the device a short rest.";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, req: &AdviceRequest) -> Advice {
        Advice {
            tip: self.tip(req),
            action: Self::action(req.alert_level).map(str::to_string),
        }
    }

    pub fn tip(&self, req: &AdviceRequest) -> String {
        let bat = req.battery_temp;
        let delta = req.temperature_delta();

        match req.alert_level {
            AlertLevel::Danger => format!(
                "Battery temperature is {:.1} °C ({:+.1} °C over ambient) while {}. \
                 Unplug the charger or stop heavy tasks and let the device cool immediately.",
                bat, delta, req.device_state
            ),
            AlertLevel::Warning => format!(
                "Battery temperature is {:.1} °C ({:+.1} °C over ambient). \
                 Reduce workload and monitor the temperature.",
                bat, delta
            ),
            AlertLevel::Safe => format!(
                "Battery temperature is {:.1} °C, within the safe range. \
                 Normal operation is fine.",
                bat
            ),
        }
    }

    /// Fixed action per level (none for safe)
    pub fn action(level: AlertLevel) -> Option<&'static str> {
        match level {
            AlertLevel::Danger => Some(DANGER_ACTION),
            AlertLevel::Warning => Some(WARNING_ACTION),
            AlertLevel::Safe => None,
        }
    }
}
