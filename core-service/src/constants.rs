//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden from the environment; the getters below
//! fall back to the defaults when a variable is unset or unparsable.

/// Default historical dataset (CSV)
pub const DEFAULT_DATASET_PATH: &str = "thermosense_test_data.csv";

/// Number of trees in the impact forest
pub const DEFAULT_TREE_COUNT: usize = 140;

/// Seed for bootstrap sampling and the hold-out shuffle
pub const DEFAULT_SEED: u64 = 42;

/// Fraction of rows held out for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Percentile of historical impact that starts the warning band
pub const DEFAULT_WARN_PERCENTILE: f64 = 75.0;

/// Percentile of historical impact that starts the danger band
pub const DEFAULT_DANGER_PERCENTILE: f64 = 90.0;

/// Default text-generation model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Text-generation endpoint base
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound for one enhancement call (milliseconds)
pub const DEFAULT_GEMINI_TIMEOUT_MS: u64 = 4000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "ThermoSense";

// ============================================
// Helper functions to read from env with fallback
// ============================================

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Get historical dataset path from environment or use default
pub fn get_dataset_path() -> String {
    std::env::var("THERMOSENSE_DATASET")
        .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}

/// Get forest size from environment or use default
pub fn get_tree_count() -> usize {
    env_parse("THERMOSENSE_TREES").unwrap_or(DEFAULT_TREE_COUNT)
}

/// Get training seed from environment or use default
pub fn get_seed() -> u64 {
    env_parse("THERMOSENSE_SEED").unwrap_or(DEFAULT_SEED)
}

/// Get the optional tree depth cap (unset = grow until pure)
pub fn get_max_depth() -> Option<usize> {
    env_parse("THERMOSENSE_MAX_DEPTH")
}

/// Get hold-out fraction from environment or use default
pub fn get_test_fraction() -> f64 {
    env_parse("THERMOSENSE_TEST_FRACTION").unwrap_or(DEFAULT_TEST_FRACTION)
}

/// Get warning percentile from environment or use default
pub fn get_warn_percentile() -> f64 {
    env_parse("THERMOSENSE_WARN_PERCENTILE").unwrap_or(DEFAULT_WARN_PERCENTILE)
}

/// Get danger percentile from environment or use default
pub fn get_danger_percentile() -> f64 {
    env_parse("THERMOSENSE_DANGER_PERCENTILE").unwrap_or(DEFAULT_DANGER_PERCENTILE)
}

/// Get text-generation API key (None = enhancement disabled)
pub fn get_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Get text-generation model name
pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL")
        .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

/// Get text-generation endpoint base
pub fn get_gemini_endpoint() -> String {
    std::env::var("GEMINI_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_GEMINI_ENDPOINT.to_string())
}

/// Get enhancement timeout (milliseconds)
pub fn get_gemini_timeout_ms() -> u64 {
    env_parse("GEMINI_TIMEOUT_MS").unwrap_or(DEFAULT_GEMINI_TIMEOUT_MS)
}

/// Check if the text-generation enhancement is enabled
pub fn is_enhancement_enabled() -> bool {
    std::env::var("THERMOSENSE_ENHANCE")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
