//! Authentication endpoints.
//!
//! `POST /api/auth/register` — Unprotected: create a patient account
//! `POST /api/auth/login` — Unprotected: exchange credentials for a session token
//! `POST /api/auth/logout` — Protected: revoke the presented session token

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth;
use crate::db::repository;
use crate::models::Patient;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

/// `POST /api/auth/register` — validate input and create the patient.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let valid = auth::validate_registration(&request.name, &request.email, &request.password)
        .map_err(ApiError::BadRequest)?;

    let conn = ctx.state.open_db()?;
    if repository::email_taken(&conn, &valid.email)? {
        return Err(ApiError::BadRequest("Email already registered".into()));
    }

    let patient = Patient {
        id: Uuid::new_v4(),
        name: valid.name,
        email: valid.email,
        password_hash: auth::hash_password(&request.password),
        created_at: Utc::now(),
    };
    repository::insert_patient(&conn, &patient)?;

    tracing::info!(patient_id = %patient.id, "patient registered");

    Ok(Json(RegisterResponse {
        user_id: patient.id,
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /api/auth/login` — verify credentials and issue a session
/// token. The response never says which half of the pair was wrong.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let email = auth::normalize_email(&request.email);

    let patient =
        repository::find_patient_by_email(&conn, &email)?.ok_or(ApiError::InvalidCredentials)?;
    if !auth::verify_password(&request.password, &patient.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.issue(patient.id, &patient.name)
    };

    tracing::info!(patient_id = %patient.id, "patient logged in");

    Ok(Json(LoginResponse { token }))
}

/// `POST /api/auth/logout` — revoke the presented session token. Runs
/// behind the auth middleware, so the token is known to be valid here.
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let mut sessions = ctx
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock".into()))?;
    sessions.revoke(token);

    Ok(StatusCode::NO_CONTENT)
}
