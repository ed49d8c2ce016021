use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Specialization;

pub fn insert_specialization(
    conn: &Connection,
    spec: &Specialization,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO specializations (id, name, tags) VALUES (?1, ?2, ?3)",
        params![spec.id.to_string(), spec.name, spec.tags],
    )?;
    Ok(())
}

pub fn link_doctor_specialization(
    conn: &Connection,
    doctor_id: &Uuid,
    specialization_id: &Uuid,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctor_specializations (doctor_id, specialization_id) VALUES (?1, ?2)",
        params![doctor_id.to_string(), specialization_id.to_string()],
    )?;
    Ok(())
}

/// Flip the soft-delete flag. Returns whether a live row was affected.
pub fn soft_delete_specialization(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE specializations SET deleted = 1 WHERE id = ?1 AND deleted = 0",
        params![id.to_string()],
    )?;
    Ok(changed > 0)
}
