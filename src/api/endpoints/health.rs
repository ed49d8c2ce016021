//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_enabled: bool,
    pub version: &'static str,
}

/// `GET /api/health` — liveness check.
pub async fn check(
    State(ctx): State<ApiContext>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        ai_enabled: ctx.state.recommender.ai_enabled(),
        version: crate::config::APP_VERSION,
    }))
}
