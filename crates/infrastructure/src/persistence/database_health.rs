//! Readiness probe for the booking database
//!
//! The database is ready when a pooled connection answers, the schema is
//! migrated to the version this build expects and the bookings table can be
//! read.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use rusqlite::Connection;
use tracing::{debug, instrument, warn};

use super::ConnectionPool;
use super::migrations::SCHEMA_VERSION;

/// SQLite implementation of [`DatabaseHealthPort`]
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn probe(conn: &Connection) -> Result<DatabaseHealth, ApplicationError> {
    let query_failed =
        |e: rusqlite::Error| ApplicationError::Internal(format!("Health check query failed: {e}"));

    let version: String = conn
        .query_row("SELECT sqlite_version()", [], |row| row.get(0))
        .map_err(query_failed)?;
    let schema: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(query_failed)?;
    if schema < SCHEMA_VERSION {
        return Err(ApplicationError::Internal(format!(
            "Database schema v{schema} is behind v{SCHEMA_VERSION}; run migrations"
        )));
    }
    let bookings: i64 = conn
        .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
        .map_err(query_failed)?;

    Ok(DatabaseHealth::reachable(format!("SQLite {version}"))
        .with_schema_version(schema)
        .with_bookings(u64::try_from(bookings).unwrap_or_default()))
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        let result = tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| {
                ApplicationError::Internal(format!("Failed to get database connection: {e}"))
            })?;
            probe(&conn)
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Database health check task failed: {e}")))?;

        match &result {
            Ok(health) => debug!(status = %health.describe(), "Database ready"),
            Err(e) => warn!(error = %e, "Database health check failed"),
        }
        result
    }
}
