//! Appointment endpoints (all protected).
//!
//! `GET /api/appointments` — the caller's appointments
//! `POST /api/appointments` — book with a doctor
//! `PUT /api/appointments/:id` — reschedule
//! `DELETE /api/appointments/:id` — cancel (status change, the row stays)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, PatientContext};
use crate::db::repository;
use crate::models::{Appointment, AppointmentStatus, AppointmentSummary};

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentSummary>,
}

/// `GET /api/appointments` — list the caller's appointments.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(patient): Extension<PatientContext>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let appointments = repository::list_appointments_for_patient(&conn, &patient.patient_id)?;

    Ok(Json(AppointmentsResponse { appointments }))
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub doctor_id: Uuid,
    pub appointment_date: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct BookResponse {
    pub appointment_id: Uuid,
}

/// `POST /api/appointments` — book an appointment with a doctor.
pub async fn book(
    State(ctx): State<ApiContext>,
    Extension(patient): Extension<PatientContext>,
    Json(request): Json<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    if !repository::doctor_exists(&conn, &request.doctor_id)? {
        return Err(ApiError::NotFound("Doctor not found".into()));
    }

    let appointment = Appointment {
        id: Uuid::new_v4(),
        doctor_id: request.doctor_id,
        patient_id: patient.patient_id,
        appointment_date: request.appointment_date,
        status: AppointmentStatus::Active,
    };
    repository::insert_appointment(&conn, &appointment)?;

    tracing::info!(
        appointment_id = %appointment.id,
        doctor_id = %request.doctor_id,
        "appointment booked"
    );

    Ok(Json(BookResponse {
        appointment_id: appointment.id,
    }))
}

#[derive(Deserialize)]
pub struct RescheduleRequest {
    pub appointment_date: DateTime<Utc>,
}

/// `PUT /api/appointments/:id` — move an appointment to a new date.
pub async fn reschedule(
    State(ctx): State<ApiContext>,
    Extension(patient): Extension<PatientContext>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<RescheduleRequest>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.state.open_db()?;
    let updated = repository::reschedule_appointment(
        &conn,
        &patient.patient_id,
        &appointment_id,
        request.appointment_date,
    )?;
    if !updated {
        return Err(ApiError::NotFound("Appointment not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/appointments/:id` — cancel an appointment. The row is
/// kept and keeps showing in listings with status `canceled`.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Extension(patient): Extension<PatientContext>,
    Path(appointment_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.state.open_db()?;
    let canceled = repository::cancel_appointment(&conn, &patient.patient_id, &appointment_id)?;
    if !canceled {
        return Err(ApiError::NotFound("Appointment not found".into()));
    }

    tracing::info!(appointment_id = %appointment_id, "appointment canceled");

    Ok(StatusCode::NO_CONTENT)
}
