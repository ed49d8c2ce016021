use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Appointment, AppointmentStatus, AppointmentSummary};

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, doctor_id, patient_id, appointment_date, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.doctor_id.to_string(),
            appt.patient_id.to_string(),
            appt.appointment_date.to_rfc3339(),
            appt.status.as_str(),
        ],
    )?;
    Ok(())
}

/// All of a patient's live appointments, canceled ones included, with
/// the doctor's name and specialization display string joined in.
pub fn list_appointments_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<AppointmentSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.doctor_id, d.name,
                COALESCE((SELECT GROUP_CONCAT(s.name, ', ')
                          FROM doctor_specializations ds
                          JOIN specializations s ON s.id = ds.specialization_id
                          WHERE ds.doctor_id = a.doctor_id AND s.deleted = 0), ''),
                a.appointment_date, a.status
         FROM appointments a
         JOIN doctors d ON d.id = a.doctor_id
         WHERE a.patient_id = ?1 AND a.deleted = 0
         ORDER BY a.appointment_date",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        let (id, doctor_id, doctor_name, specialization, date, status) = row?;
        appointments.push(AppointmentSummary {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            doctor_id: Uuid::parse_str(&doctor_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            doctor_name,
            specialization,
            appointment_date: DateTime::parse_from_rfc3339(&date)
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_default(),
            status: AppointmentStatus::from_str(&status)?,
        });
    }
    Ok(appointments)
}

/// Mark one of the patient's appointments canceled. Returns false when
/// no live appointment matches the pair.
pub fn cancel_appointment(
    conn: &Connection,
    patient_id: &Uuid,
    appointment_id: &Uuid,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1
         WHERE id = ?2 AND patient_id = ?3 AND deleted = 0",
        params![
            AppointmentStatus::Canceled.as_str(),
            appointment_id.to_string(),
            patient_id.to_string(),
        ],
    )?;
    Ok(changed > 0)
}

/// Move one of the patient's appointments to a new date. Returns false
/// when no live appointment matches the pair.
pub fn reschedule_appointment(
    conn: &Connection,
    patient_id: &Uuid,
    appointment_id: &Uuid,
    new_date: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET appointment_date = ?1
         WHERE id = ?2 AND patient_id = ?3 AND deleted = 0",
        params![
            new_date.to_rfc3339(),
            appointment_id.to_string(),
            patient_id.to_string(),
        ],
    )?;
    Ok(changed > 0)
}
