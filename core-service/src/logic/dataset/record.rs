use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureSource;

/// Timestamp layouts accepted besides RFC 3339
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One labeled historical observation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub timestamp: NaiveDateTime,
    pub battery_temp: f64,
    pub ambient_temp: f64,
    pub device_state: String,
    pub measured_health_impact: f64,
}

impl HistoricalRecord {
    /// Hour of day derived from the timestamp
    pub fn hour(&self) -> u8 {
        self.timestamp.hour() as u8
    }
}

impl FeatureSource for HistoricalRecord {
    fn battery_temp(&self) -> f64 {
        self.battery_temp
    }

    fn ambient_temp(&self) -> f64 {
        self.ambient_temp
    }

    fn hour_of_day(&self) -> Option<u8> {
        Some(self.hour())
    }

    fn device_state(&self) -> &str {
        &self.device_state
    }
}

/// CSV row before validation
#[derive(Deserialize, Debug)]
pub(crate) struct RawRow {
    pub timestamp: String,
    pub battery_temp: f64,
    pub ambient_temp: f64,
    pub device_state: String,
    pub measured_health_impact: f64,
}

impl RawRow {
    /// Validate into a record, or explain why the row is unusable
    pub(crate) fn into_record(self) -> Result<HistoricalRecord, String> {
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or_else(|| format!("unparsable timestamp '{}'", self.timestamp))?;

        let numbers = [
            ("battery_temp", self.battery_temp),
            ("ambient_temp", self.ambient_temp),
            ("measured_health_impact", self.measured_health_impact),
        ];
        if let Some((name, value)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("non-finite {}: {}", name, value));
        }

        if self.device_state.is_empty() {
            return Err("empty device_state".to_string());
        }

        Ok(HistoricalRecord {
            timestamp,
            battery_temp: self.battery_temp,
            ambient_temp: self.ambient_temp,
            device_state: self.device_state,
            measured_health_impact: self.measured_health_impact,
        })
    }
}

/// Parse a timestamp, keeping the wall-clock hour as written
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
