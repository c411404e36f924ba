//! Observation - One live sensor reading
//!
//! Built per request, never persisted.
//! The wall-clock default for `hour_of_day` is NOT applied here: callers
//! decide through an explicit [`Clock`].

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::features::FeatureSource;

/// One thermal reading from a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Battery temperature (°C)
    pub battery_temp: f64,
    /// Ambient temperature (°C)
    pub ambient_temp: f64,
    /// Device state (idle / charging / discharging / ...)
    pub device_state: String,
    /// Local hour 0-23, if the caller knows it
    #[serde(default)]
    pub hour_of_day: Option<u8>,
}

impl Observation {
    pub fn new(battery_temp: f64, ambient_temp: f64, device_state: impl Into<String>) -> Self {
        Self {
            battery_temp,
            ambient_temp,
            device_state: device_state.into(),
            hour_of_day: None,
        }
    }

    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hour_of_day = Some(hour);
        self
    }

    /// Fill a missing hour from the given clock (keeps an explicit one)
    pub fn with_hour_from(mut self, clock: &dyn Clock) -> Self {
        if self.hour_of_day.is_none() {
            self.hour_of_day = Some(clock.current_hour());
        }
        self
    }

    /// Signed battery-over-ambient difference (°C)
    pub fn temperature_delta(&self) -> f64 {
        self.battery_temp - self.ambient_temp
    }
}

impl FeatureSource for Observation {
    fn battery_temp(&self) -> f64 {
        self.battery_temp
    }

    fn ambient_temp(&self) -> f64 {
        self.ambient_temp
    }

    fn hour_of_day(&self) -> Option<u8> {
        self.hour_of_day
    }

    fn device_state(&self) -> &str {
        &self.device_state
    }
}

// ============================================================================
// TIME SOURCE
// ============================================================================

/// Source of the current hour for observations that lack one
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u8;
}

/// Host local time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn current_hour(&self) -> u8 {
        chrono::Local::now().hour() as u8
    }
}

/// Always reports the same hour
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u8);

impl Clock for FixedClock {
    fn current_hour(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_hour_from_fills_missing_hour() {
        let obs = Observation::new(30.0, 25.0, "idle").with_hour_from(&FixedClock(14));
        assert_eq!(obs.hour_of_day, Some(14));
    }

    #[test]
    fn test_with_hour_from_keeps_explicit_hour() {
        let obs = Observation::new(30.0, 25.0, "idle")
            .with_hour(3)
            .with_hour_from(&FixedClock(14));
        assert_eq!(obs.hour_of_day, Some(3));
    }

    #[test]
    fn test_local_clock_in_range() {
        assert!(LocalClock.current_hour() < 24);
    }

    #[test]
    fn test_deserialize_without_hour() {
        let obs: Observation = serde_json::from_str(
            r#"{"battery_temp": 41.5, "ambient_temp": 22.0, "device_state": "charging"}"#,
        ).unwrap();
        assert_eq!(obs.hour_of_day, None);
        assert!((obs.temperature_delta() - 19.5).abs() < 1e-9);
    }
}
