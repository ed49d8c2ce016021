//! Doctor roster and recommendation endpoints.
//!
//! `GET /api/doctors` — Unprotected: full roster with specializations
//! `POST /api/doctors/recommend` — Unprotected: symptom-based shortlist

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::DoctorSummary;

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<DoctorSummary>,
}

/// `GET /api/doctors` — list every live doctor.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DoctorsResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let roster = repository::load_doctor_roster(&conn)?;
    let doctors = roster.iter().map(DoctorSummary::from_profile).collect();

    Ok(Json(DoctorsResponse { doctors }))
}

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub symptoms: String,
}

/// `POST /api/doctors/recommend` — match doctors to free-text symptoms.
///
/// The completion-API path blocks on HTTP, so the resolver runs on the
/// blocking pool.
pub async fn recommend(
    State(ctx): State<ApiContext>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<DoctorsResponse>, ApiError> {
    let roster = {
        let conn = ctx.state.open_db()?;
        repository::load_doctor_roster(&conn)?
    };

    let recommender = Arc::clone(&ctx.state.recommender);
    let symptoms = request.symptoms;
    let doctors = tokio::task::spawn_blocking(move || recommender.recommend(&symptoms, &roster))
        .await
        .map_err(|e| ApiError::Internal(format!("recommendation task failed: {e}")))?
        .map_err(ApiError::from)?;

    Ok(Json(DoctorsResponse { doctors }))
}
