//! Configuration module

use std::env;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// OpenWeather key (weather proxy is disabled without it)
    pub openweather_api_key: Option<String>,

    /// OpenWeather current-weather endpoint
    pub openweather_url: String,

    /// Allowed browser origins
    pub cors_origins: Vec<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),

            openweather_url: env::var("OPENWEATHER_URL")
                .unwrap_or_else(|_| DEFAULT_OPENWEATHER_URL.to_string()),

            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            openweather_api_key: None,
            openweather_url: DEFAULT_OPENWEATHER_URL.to_string(),
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            environment: "development".to_string(),
        }
    }
}

/// Comma-separated list, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test ,, http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.environment, "development");
    }
}
