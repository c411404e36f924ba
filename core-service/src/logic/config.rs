//! Engine Configuration
//!
//! Assembled once from the environment (see `constants`) and handed to
//! startup. Nothing here changes after training.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::model::{ForestParams, ThresholdConfig};
use crate::logic::scoring::TrainingConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub dataset_path: String,
    pub training: TrainingConfig,
    pub enhance: EnhanceConfig,
}

/// Text-generation tier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceConfig {
    pub enabled: bool,
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl EnhanceConfig {
    /// Enabled and a key is present
    pub fn is_active(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            api_key: None,
            model: constants::DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: constants::DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_ms: constants::DEFAULT_GEMINI_TIMEOUT_MS,
        }
    }

    pub fn from_env() -> Self {
        Self {
            enabled: constants::is_enhancement_enabled(),
            api_key: constants::get_gemini_api_key(),
            model: constants::get_gemini_model(),
            endpoint: constants::get_gemini_endpoint(),
            timeout_ms: constants::get_gemini_timeout_ms(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            dataset_path: constants::get_dataset_path(),
            training: TrainingConfig {
                forest: ForestParams {
                    n_trees: constants::get_tree_count(),
                    max_depth: constants::get_max_depth(),
                    seed: constants::get_seed(),
                    ..Default::default()
                },
                test_fraction: constants::get_test_fraction(),
                thresholds: ThresholdConfig {
                    warn_percentile: constants::get_warn_percentile(),
                    danger_percentile: constants::get_danger_percentile(),
                },
            },
            enhance: EnhanceConfig::from_env(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset_path: constants::DEFAULT_DATASET_PATH.to_string(),
            training: TrainingConfig::default(),
            enhance: EnhanceConfig::disabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.dataset_path, "thermosense_test_data.csv");
        assert_eq!(config.training.forest.n_trees, 140);
        assert_eq!(config.training.test_fraction, 0.2);
        assert!(!config.enhance.is_active());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = EngineConfig::default();
        config.enhance.api_key = Some("secret".into());
        config.enhance.enabled = true;

        assert!(config.enhance.is_active());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_enabled_without_key_is_inactive() {
        let enhance = EnhanceConfig { enabled: true, ..EnhanceConfig::disabled() };
        assert!(!enhance.is_active());
        assert_eq!(enhance.timeout(), Duration::from_millis(4000));
    }
}
