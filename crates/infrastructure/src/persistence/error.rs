//! Shared error mapping for the SQLite persistence layer

use application::error::ApplicationError;

use super::connection::DatabaseError;

/// Map a pool or SQLite error to an application-layer error
pub fn map_db_error(e: impl Into<DatabaseError>) -> ApplicationError {
    match e.into() {
        DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows) => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        DatabaseError::Pool(e) => {
            ApplicationError::Internal(format!("Database pool error: {e}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}
