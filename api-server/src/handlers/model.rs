//! Model introspection handler

use axum::{extract::State, Json};
use thermosense_core::ModelInfo;

use crate::AppState;

pub async fn info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(state.advisory.context().model_info())
}
