use std::collections::HashMap;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Doctor, DoctorProfile, Specialization};

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, name) VALUES (?1, ?2)",
        params![doctor.id.to_string(), doctor.name],
    )?;
    Ok(())
}

pub fn doctor_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM doctors WHERE id = ?1 AND deleted = 0",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Flip the soft-delete flag. Returns whether a live row was affected.
pub fn soft_delete_doctor(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET deleted = 1 WHERE id = ?1 AND deleted = 0",
        params![id.to_string()],
    )?;
    Ok(changed > 0)
}

/// Load every live doctor together with their live specializations,
/// ordered by doctor name.
pub fn load_doctor_roster(conn: &Connection) -> Result<Vec<DoctorProfile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name FROM doctors WHERE deleted = 0 ORDER BY name",
    )?;
    let doctor_rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut profiles: Vec<DoctorProfile> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    for row in doctor_rows {
        let (id, name) = row?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        index.insert(id, profiles.len());
        profiles.push(DoctorProfile {
            id,
            name,
            specializations: Vec::new(),
        });
    }

    let mut stmt = conn.prepare(
        "SELECT ds.doctor_id, s.id, s.name, s.tags
         FROM doctor_specializations ds
         JOIN specializations s ON s.id = ds.specialization_id
         WHERE s.deleted = 0",
    )?;
    let spec_rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    for row in spec_rows {
        let (doctor_id, spec_id, name, tags) = row?;
        let doctor_id = Uuid::parse_str(&doctor_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        // Links to soft-deleted doctors fall out here: they never made
        // it into the index.
        if let Some(&i) = index.get(&doctor_id) {
            profiles[i].specializations.push(Specialization {
                id: Uuid::parse_str(&spec_id)
                    .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
                name,
                tags,
            });
        }
    }

    Ok(profiles)
}
