//! Advisory request payload

use serde::Deserialize;
use thermosense_core::Observation;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdvisoryRequest {
    #[validate(range(min = -50.0, max = 150.0, message = "battery_temp must be between -50 and 150"))]
    pub battery_temp: f64,

    #[validate(range(min = -50.0, max = 150.0, message = "ambient_temp must be between -50 and 150"))]
    pub ambient_temp: f64,

    #[validate(length(min = 1, message = "device_state must not be empty"))]
    pub device_state: String,

    #[validate(range(max = 23, message = "hour_of_day must be between 0 and 23"))]
    pub hour_of_day: Option<u8>,
}

impl AdvisoryRequest {
    pub fn into_observation(self) -> Observation {
        let observation = Observation::new(self.battery_temp, self.ambient_temp, self.device_state);
        match self.hour_of_day {
            Some(hour) => observation.with_hour(hour),
            None => observation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(bat: f64, state: &str, hour: Option<u8>) -> AdvisoryRequest {
        AdvisoryRequest {
            battery_temp: bat,
            ambient_temp: 25.0,
            device_state: state.to_string(),
            hour_of_day: hour,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request(45.5, "charging", Some(23)).validate().is_ok());
        assert!(request(-50.0, "idle", None).validate().is_ok());
    }

    #[test]
    fn test_invalid_requests() {
        assert!(request(150.1, "idle", None).validate().is_err());
        assert!(request(30.0, "", None).validate().is_err());
        assert!(request(30.0, "idle", Some(24)).validate().is_err());
    }

    #[test]
    fn test_into_observation_keeps_hour() {
        let obs = request(30.0, "idle", Some(7)).into_observation();
        assert_eq!(obs.hour_of_day, Some(7));
        assert!(request(30.0, "idle", None).into_observation().hour_of_day.is_none());
    }
}
