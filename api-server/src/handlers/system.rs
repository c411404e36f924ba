//! Host sensor snapshot handler

use axum::Json;
use thermosense_core::logic::sensors::{self, SystemStats};

use crate::{AppError, AppResult};

/// Sampling blocks for a few hundred ms, so it runs off the async workers
pub async fn stats() -> AppResult<Json<SystemStats>> {
    let stats = tokio::task::spawn_blocking(sensors::collect)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(stats))
}
