//! Database migrations
//!
//! Manages database schema versioning and migrations. Each migration is an
//! idempotent `migrate_vN` function; `schema_version` records how far a
//! database has been brought.
//!
//! ## Rollback Strategy
//!
//! Rollbacks are manual - if a migration fails:
//! 1. Check the error message for details
//! 2. Fix the underlying issue
//! 3. Manually repair the database if needed
//! 4. Re-run migrations
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vN` function
//! 3. Register it in `MIGRATIONS`

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

type Migration = fn(&Connection) -> Result<(), DatabaseError>;

/// Migrations in order, with a label for logging
const MIGRATIONS: [(i32, &str, Migration); 2] = [
    (1, "bookings table", migrate_v1),
    (2, "booking listing index", migrate_v2),
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version >= SCHEMA_VERSION {
        debug!(version = current_version, "Database schema is up to date");
        return Ok(());
    }

    info!(
        from_version = current_version,
        to_version = SCHEMA_VERSION,
        "Running database migrations"
    );

    for (version, label, migrate) in MIGRATIONS {
        if current_version >= version {
            continue;
        }
        if let Err(e) = migrate(conn) {
            error!(version, error = %e, "Migration V{version:03} ({label}) failed");
            return Err(e);
        }
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!(version = SCHEMA_VERSION, "Database migrations complete");
    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: bookings table
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: bookings table");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bookings (
            id TEXT PRIMARY KEY,
            customer_name TEXT NOT NULL,
            number_of_guests INTEGER NOT NULL CHECK(number_of_guests >= 1),
            booking_date TEXT NOT NULL,
            booking_time TEXT NOT NULL,
            location TEXT,
            cuisine_preference TEXT,
            special_requests TEXT,
            weather_info TEXT,
            seating_preference TEXT NOT NULL DEFAULT 'unspecified'
                CHECK(seating_preference IN ('indoor', 'outdoor', 'unspecified')),
            status TEXT NOT NULL DEFAULT 'confirmed'
                CHECK(status IN ('confirmed', 'pending', 'cancelled')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(booking_date);
        ",
    )
    .map_err(|e| DatabaseError::Migration(format!("V001: {e}")))
}

/// Migration to version 2: index for newest-first listing
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V002: booking listing index");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_bookings_created ON bookings(created_at DESC);",
    )
    .map_err(|e| DatabaseError::Migration(format!("V002: {e}")))
}
