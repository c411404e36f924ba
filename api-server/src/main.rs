//! ThermoSense API Server
//!
//! HTTP boundary for the advisory engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    THERMOSENSE API                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │  Router   │  │  Advisory        │  │  Proxies        │  │
//! │  │  (Axum)   │─▶│  Service         │  │  weather/system │  │
//! │  └───────────┘  └────────┬─────────┘  └─────────────────┘  │
//! │                          ▼                                  │
//! │               ┌──────────────────────┐                      │
//! │               │ ScoringContext (Arc) │                      │
//! │               └──────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use thermosense_core::{AdvisoryService, EngineConfig, ScoringContext};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

/// Upper bound for weather proxy calls
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "thermosense_api=debug,thermosense_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let engine_config = EngineConfig::from_env();

    tracing::info!("ThermoSense API starting ({})...", config.environment);
    tracing::info!("Dataset: {}", engine_config.dataset_path);

    // Fit once, before serving
    let context = ScoringContext::from_config(&engine_config)
        .context("failed to build scoring context")?;
    let thresholds = context.thresholds();
    tracing::info!(
        "Impact thresholds: warn >= {:.3}, danger >= {:.3}",
        thresholds.warn(),
        thresholds.danger()
    );

    if config.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set; /weather will return 503");
    }

    let http = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .context("failed to create HTTP client")?;

    // Build application state
    let state = AppState {
        advisory: AdvisoryService::from_config(Arc::new(context), &engine_config.enhance),
        config: config.clone(),
        http,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub advisory: AdvisoryService,
    pub config: config::Config,
    pub http: reqwest::Client,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state.config.cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/advisory", post(handlers::advisory::advise))
        .route("/model", get(handlers::model::info))
        .route("/weather", get(handlers::weather::current))
        .route("/system_stats", get(handlers::system::stats))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use thermosense_core::logic::features::FeatureEncoder;
    use thermosense_core::logic::model::{CalibratedThresholds, ImpactRegressor};
    use tower::ServiceExt;

    struct FixedImpact(f64);

    impl ImpactRegressor for FixedImpact {
        fn predict(&self, _features: &[f64]) -> f64 {
            self.0
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn test_app(impact: f64) -> Router {
        let context = ScoringContext::from_parts(
            FeatureEncoder::from_categories(["charging", "discharging", "idle"]),
            Box::new(FixedImpact(impact)),
            CalibratedThresholds::from_values(0.40, 0.70),
        );

        create_router(AppState {
            advisory: AdvisoryService::template_only(Arc::new(context)),
            config: config::Config::default(),
            http: reqwest::Client::new(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_message() {
        let (status, body) = send(test_app(0.1), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "ThermoSense API is running");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(0.1), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_advisory_danger() {
        let request = post_json("/advisory", serde_json::json!({
            "battery_temp": 45.5,
            "ambient_temp": 25.0,
            "device_state": "charging",
            "hour_of_day": 14
        }));
        let (status, body) = send(test_app(0.75), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["alert_level"], "danger");
        assert_eq!(body["predicted_health_impact"], 0.75);
        assert!(body["optional_action"].is_string());
    }

    #[tokio::test]
    async fn test_advisory_safe_without_hour() {
        let request = post_json("/advisory", serde_json::json!({
            "battery_temp": 28.0,
            "ambient_temp": 24.0,
            "device_state": "idle"
        }));
        let (status, body) = send(test_app(0.15), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["alert_level"], "safe");
        assert!(body["optional_action"].is_null());
    }

    #[tokio::test]
    async fn test_advisory_validation() {
        let cases = [
            serde_json::json!({"battery_temp": 200.0, "ambient_temp": 24.0, "device_state": "idle"}),
            serde_json::json!({"battery_temp": 30.0, "ambient_temp": 24.0, "device_state": ""}),
            serde_json::json!({"battery_temp": 30.0, "ambient_temp": 24.0, "device_state": "idle", "hour_of_day": 24}),
        ];

        for case in cases {
            let (status, body) = send(test_app(0.1), post_json("/advisory", case)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["status"], 400);
        }
    }

    #[tokio::test]
    async fn test_model_info() {
        let (status, body) = send(test_app(0.1), get_request("/model")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_name"], "fixed");
        assert_eq!(body["layout"]["feature_count"], 6);
        assert_eq!(body["thresholds"]["warn"], 0.4);
    }

    #[tokio::test]
    async fn test_weather_without_key_is_unavailable() {
        let (status, body) = send(test_app(0.1), get_request("/weather?lat=18.5&lon=73.8")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], 503);
    }

    #[tokio::test]
    async fn test_weather_rejects_bad_coordinates() {
        let (status, _) = send(test_app(0.1), get_request("/weather?lat=95&lon=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
