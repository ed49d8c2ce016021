//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::recommend::DoctorRecommender;

/// State shared by every request handler. SQLite connections are opened
/// per request from the stored path; the recommender is built once at
/// startup and reused.
pub struct AppState {
    pub db_path: PathBuf,
    pub recommender: Arc<DoctorRecommender>,
}

impl AppState {
    pub fn new(db_path: PathBuf, recommender: DoctorRecommender) -> Self {
        Self {
            db_path,
            recommender: Arc::new(recommender),
        }
    }

    /// Open a database connection for one request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_schema() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(
            tmp.path().join("state.db"),
            DoctorRecommender::new(None, "gpt-4o-mini"),
        );

        let conn = state.open_db().unwrap();
        assert_eq!(db::count_tables(&conn).unwrap(), 6);
    }
}
