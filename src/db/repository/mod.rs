//! Repository layer — entity-scoped database operations.
//!
//! Every query spells out its own `deleted = 0` predicate; nothing
//! filters soft-deleted rows implicitly.

mod appointment;
mod doctor;
mod patient;
mod specialization;

// Re-export all public items from sub-modules
pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use specialization::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rusqlite::{params, Connection};
    use uuid::Uuid;

    use crate::db::sqlite::open_memory_database;
    use crate::models::*;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_patient(conn: &Connection, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_patient(conn, &Patient {
            id,
            name: "Test Patient".into(),
            email: email.into(),
            password_hash: "hash".into(),
            created_at: Utc::now(),
        }).unwrap();
        id
    }

    fn make_doctor(conn: &Connection, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_doctor(conn, &Doctor { id, name: name.into() }).unwrap();
        id
    }

    fn make_specialization(conn: &Connection, name: &str, tags: &str) -> Uuid {
        let id = Uuid::new_v4();
        insert_specialization(conn, &Specialization {
            id,
            name: name.into(),
            tags: tags.into(),
        }).unwrap();
        id
    }

    fn make_appointment(
        conn: &Connection,
        doctor_id: Uuid,
        patient_id: Uuid,
        date: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        insert_appointment(conn, &Appointment {
            id,
            doctor_id,
            patient_id,
            appointment_date: date,
            status: AppointmentStatus::Active,
        }).unwrap();
        id
    }

    #[test]
    fn patient_insert_and_find_by_email() {
        let conn = test_db();
        let id = make_patient(&conn, "ana@example.com");

        let found = find_patient_by_email(&conn, "ana@example.com").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.name, "Test Patient");

        let missing = find_patient_by_email(&conn, "nobody@example.com").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn email_taken_tracks_live_rows_only() {
        let conn = test_db();
        let id = make_patient(&conn, "ana@example.com");
        assert!(email_taken(&conn, "ana@example.com").unwrap());

        conn.execute(
            "UPDATE patients SET deleted = 1 WHERE id = ?1",
            params![id.to_string()],
        ).unwrap();
        assert!(!email_taken(&conn, "ana@example.com").unwrap());
        assert!(find_patient_by_email(&conn, "ana@example.com").unwrap().is_none());
    }

    #[test]
    fn doctor_exists_and_soft_delete() {
        let conn = test_db();
        let id = make_doctor(&conn, "Filan Fisteku");
        assert!(doctor_exists(&conn, &id).unwrap());

        assert!(soft_delete_doctor(&conn, &id).unwrap());
        assert!(!doctor_exists(&conn, &id).unwrap());
        // Second delete finds no live row
        assert!(!soft_delete_doctor(&conn, &id).unwrap());
    }

    #[test]
    fn roster_groups_specializations_per_doctor() {
        let conn = test_db();
        let cardio = make_specialization(&conn, "Cardiology", "heart,chest pain");
        let derma = make_specialization(&conn, "Dermatology", "skin,rash");
        let d1 = make_doctor(&conn, "Filan Fisteku");
        let d2 = make_doctor(&conn, "Dem Alia");
        link_doctor_specialization(&conn, &d1, &cardio).unwrap();
        link_doctor_specialization(&conn, &d1, &derma).unwrap();
        link_doctor_specialization(&conn, &d2, &derma).unwrap();

        let roster = load_doctor_roster(&conn).unwrap();
        assert_eq!(roster.len(), 2);

        let filan = roster.iter().find(|d| d.id == d1).unwrap();
        assert_eq!(filan.specializations.len(), 2);
        let dem = roster.iter().find(|d| d.id == d2).unwrap();
        assert_eq!(dem.specializations.len(), 1);
        assert_eq!(dem.specializations[0].name, "Dermatology");
        assert_eq!(dem.specializations[0].tags, "skin,rash");
    }

    #[test]
    fn roster_excludes_soft_deleted_doctor() {
        let conn = test_db();
        let cardio = make_specialization(&conn, "Cardiology", "heart");
        let d1 = make_doctor(&conn, "Filan Fisteku");
        let d2 = make_doctor(&conn, "Dem Alia");
        link_doctor_specialization(&conn, &d1, &cardio).unwrap();
        link_doctor_specialization(&conn, &d2, &cardio).unwrap();

        soft_delete_doctor(&conn, &d1).unwrap();

        let roster = load_doctor_roster(&conn).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, d2);
    }

    #[test]
    fn roster_excludes_soft_deleted_specialization() {
        let conn = test_db();
        let cardio = make_specialization(&conn, "Cardiology", "heart");
        let derma = make_specialization(&conn, "Dermatology", "skin");
        let d1 = make_doctor(&conn, "Filan Fisteku");
        link_doctor_specialization(&conn, &d1, &cardio).unwrap();
        link_doctor_specialization(&conn, &d1, &derma).unwrap();

        soft_delete_specialization(&conn, &derma).unwrap();

        let roster = load_doctor_roster(&conn).unwrap();
        assert_eq!(roster[0].specializations.len(), 1);
        assert_eq!(roster[0].specializations[0].name, "Cardiology");
    }

    #[test]
    fn doctor_without_specializations_still_listed() {
        let conn = test_db();
        make_doctor(&conn, "Sadik Sadiku");

        let roster = load_doctor_roster(&conn).unwrap();
        assert_eq!(roster.len(), 1);
        assert!(roster[0].specializations.is_empty());
    }

    #[test]
    fn appointment_listing_joins_doctor_details() {
        let conn = test_db();
        let cardio = make_specialization(&conn, "Cardiology", "heart");
        let internal = make_specialization(&conn, "Internal Medicine", "internal");
        let doctor = make_doctor(&conn, "Filan Fisteku");
        link_doctor_specialization(&conn, &doctor, &cardio).unwrap();
        link_doctor_specialization(&conn, &doctor, &internal).unwrap();
        let patient = make_patient(&conn, "ana@example.com");

        let date = Utc.with_ymd_and_hms(2026, 9, 1, 10, 30, 0).unwrap();
        let appt = make_appointment(&conn, doctor, patient, date);

        let list = list_appointments_for_patient(&conn, &patient).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, appt);
        assert_eq!(list[0].doctor_name, "Filan Fisteku");
        assert!(list[0].specialization.contains("Cardiology"));
        assert!(list[0].specialization.contains("Internal Medicine"));
        assert_eq!(list[0].appointment_date, date);
        assert_eq!(list[0].status, AppointmentStatus::Active);
    }

    #[test]
    fn appointment_listing_is_scoped_to_patient() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "Filan Fisteku");
        let ana = make_patient(&conn, "ana@example.com");
        let ben = make_patient(&conn, "ben@example.com");
        make_appointment(&conn, doctor, ana, Utc::now());

        assert_eq!(list_appointments_for_patient(&conn, &ana).unwrap().len(), 1);
        assert!(list_appointments_for_patient(&conn, &ben).unwrap().is_empty());
    }

    #[test]
    fn cancel_keeps_the_row_visible() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "Filan Fisteku");
        let patient = make_patient(&conn, "ana@example.com");
        let appt = make_appointment(&conn, doctor, patient, Utc::now());

        assert!(cancel_appointment(&conn, &patient, &appt).unwrap());

        let list = list_appointments_for_patient(&conn, &patient).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].status, AppointmentStatus::Canceled);
    }

    #[test]
    fn cancel_requires_matching_patient() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "Filan Fisteku");
        let ana = make_patient(&conn, "ana@example.com");
        let ben = make_patient(&conn, "ben@example.com");
        let appt = make_appointment(&conn, doctor, ana, Utc::now());

        assert!(!cancel_appointment(&conn, &ben, &appt).unwrap());
        assert!(!cancel_appointment(&conn, &ana, &Uuid::new_v4()).unwrap());

        let list = list_appointments_for_patient(&conn, &ana).unwrap();
        assert_eq!(list[0].status, AppointmentStatus::Active);
    }

    #[test]
    fn reschedule_moves_the_date() {
        let conn = test_db();
        let doctor = make_doctor(&conn, "Filan Fisteku");
        let patient = make_patient(&conn, "ana@example.com");
        let appt = make_appointment(
            &conn,
            doctor,
            patient,
            Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
        );

        let new_date = Utc.with_ymd_and_hms(2026, 9, 15, 14, 0, 0).unwrap();
        assert!(reschedule_appointment(&conn, &patient, &appt, new_date).unwrap());
        assert!(!reschedule_appointment(&conn, &patient, &Uuid::new_v4(), new_date).unwrap());

        let list = list_appointments_for_patient(&conn, &patient).unwrap();
        assert_eq!(list[0].appointment_date, new_date);
    }

    #[test]
    fn booking_unknown_doctor_violates_foreign_key() {
        let conn = test_db();
        let patient = make_patient(&conn, "ana@example.com");
        let result = insert_appointment(&conn, &Appointment {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            patient_id: patient,
            appointment_date: Utc::now(),
            status: AppointmentStatus::Active,
        });
        assert!(result.is_err());
    }
}
