//! Advisory handler

use axum::{extract::State, Json};
use thermosense_core::{AdvisoryResult, LocalClock};
use validator::Validate;

use crate::models::AdvisoryRequest;
use crate::{AppResult, AppState};

/// Score one reading. A missing hour is taken from the server clock.
pub async fn advise(
    State(state): State<AppState>,
    Json(req): Json<AdvisoryRequest>,
) -> AppResult<Json<AdvisoryResult>> {
    req.validate()?;

    let observation = req.into_observation().with_hour_from(&LocalClock);
    let result = state.advisory.advisory(&observation).await;

    tracing::debug!(
        level = %result.alert_level,
        impact = result.predicted_health_impact,
        "Advisory for {} at {:.1} °C",
        observation.device_state,
        observation.battery_temp
    );

    Ok(Json(result))
}
