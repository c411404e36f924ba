//! Weather proxy handler

use axum::{extract::{Query, State}, Json};
use validator::Validate;

use crate::models::{OpenWeatherResponse, WeatherQuery, WeatherSummary};
use crate::{AppError, AppResult, AppState};

/// Current weather for a coordinate, reduced to name / temp / condition
pub async fn current(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<WeatherSummary>> {
    query.validate()?;

    let api_key = state.config.openweather_api_key.as_deref()
        .ok_or_else(|| AppError::ServiceUnavailable("Weather service not configured".to_string()))?;

    let response = state.http
        .get(&state.config.openweather_url)
        .query(&[
            ("lat", query.lat.to_string()),
            ("lon", query.lon.to_string()),
            ("units", "metric".to_string()),
            ("appid", api_key.to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "weather service returned {}",
            response.status()
        )));
    }

    let body: OpenWeatherResponse = response.json().await?;
    let summary = body.summarize()
        .ok_or_else(|| AppError::ExternalServiceError("weather body has no condition".to_string()))?;

    Ok(Json(summary))
}
