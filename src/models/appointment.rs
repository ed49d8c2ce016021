use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;

/// An appointment row. Cancellation flips `status`; the row itself
/// stays and keeps showing up in the patient's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// Response shape for appointment listings: the appointment joined with
/// the doctor's name and specialization display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub specialization: String,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
}
