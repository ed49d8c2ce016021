//! Demo roster seeding.
//!
//! Doctors and specializations are administered out of band; a fresh
//! install gets this small roster so the service is usable immediately.

use std::collections::HashMap;

use rusqlite::Connection;
use uuid::Uuid;

use super::repository;
use super::DatabaseError;
use crate::models::{Doctor, Specialization};

const DEMO_SPECIALIZATIONS: &[(&str, &str)] = &[
    (
        "Cardiology",
        "heart,chest pain,cardio,cardiac,blood pressure,hypertension,arrhythmia,chest discomfort",
    ),
    (
        "Dermatology",
        "skin,rash,acne,eczema,psoriasis,dermatitis,itchy,redness,lesion,mole",
    ),
    (
        "Neurology",
        "headache,seizure,neuro,neurological,migraine,epilepsy,stroke,brain,memory,dizziness",
    ),
    (
        "General Medicine",
        "cough,fever,flu,cold,general,common,infection,virus,bacterial,symptoms",
    ),
    (
        "Internal Medicine",
        "internal,organ,digestive,stomach,abdomen,chronic,diabetes,hypertension,metabolic",
    ),
    (
        "Pediatrics",
        "child,children,pediatric,baby,infant,toddler,kid,childhood,adolescent",
    ),
    (
        "Orthopedics",
        "bone,joint,fracture,broken,sprain,orthopedic,back pain,knee,shoulder,spine",
    ),
    (
        "Emergency Medicine",
        "emergency,urgent,acute,trauma,injury,accident,severe,critical,emergency care",
    ),
];

const DEMO_DOCTORS: &[(&str, &[&str])] = &[
    ("Filan Fisteku", &["Cardiology", "Internal Medicine"]),
    ("Dem Alia", &["Dermatology", "General Medicine"]),
    ("Ali Dema", &["Neurology", "Emergency Medicine"]),
    ("Sadik Sadiku", &["General Medicine", "Pediatrics"]),
];

/// Seed the demo roster if the doctors table is empty. Returns whether
/// anything was inserted.
pub fn seed_demo_roster(conn: &mut Connection) -> Result<bool, DatabaseError> {
    let doctors: i64 = conn.query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))?;
    if doctors > 0 {
        return Ok(false);
    }

    let tx = conn.transaction()?;

    let mut spec_ids: HashMap<&str, Uuid> = HashMap::new();
    for (name, tags) in DEMO_SPECIALIZATIONS {
        let spec = Specialization {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            tags: (*tags).to_string(),
        };
        repository::insert_specialization(&tx, &spec)?;
        spec_ids.insert(name, spec.id);
    }

    for (name, spec_names) in DEMO_DOCTORS {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
        };
        repository::insert_doctor(&tx, &doctor)?;

        for spec_name in *spec_names {
            let spec_id = spec_ids.get(spec_name).ok_or_else(|| {
                DatabaseError::ConstraintViolation(format!("unknown specialization {spec_name}"))
            })?;
            repository::link_doctor_specialization(&tx, &doctor.id, spec_id)?;
        }
    }

    tx.commit()?;
    Ok(true)
}
