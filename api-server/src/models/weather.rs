//! Weather proxy models

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeatherQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "lon must be between -180 and 180"))]
    pub lon: f64,
}

/// What the front-end needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub name: Option<String>,
    pub temp: f64,
    pub condition: String,
}

/// Subset of the OpenWeather current-weather body
#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub name: Option<String>,
    pub main: OpenWeatherMain,
    #[serde(default)]
    pub weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherCondition {
    pub main: String,
}

impl OpenWeatherResponse {
    /// None when the body has no weather condition
    pub fn summarize(self) -> Option<WeatherSummary> {
        let condition = self.weather.into_iter().next()?.main;
        Some(WeatherSummary {
            name: self.name,
            temp: self.main.temp,
            condition,
        })
    }
}
