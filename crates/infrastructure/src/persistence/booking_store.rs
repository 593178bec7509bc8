//! SQLite-based booking persistence

use std::sync::Arc;

use application::{error::ApplicationError, ports::BookingStore};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use domain::entities::Booking;
use domain::value_objects::BookingId;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;
use super::error::map_db_error;

const BOOKING_COLUMNS: &str = "id, customer_name, number_of_guests, booking_date, booking_time,
    location, cuisine_preference, special_requests, weather_info,
    seating_preference, status, created_at, updated_at";

/// SQLite-based booking store
#[derive(Debug, Clone)]
pub struct SqliteBookingStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteBookingStore {
    /// Create a new SQLite booking store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    #[instrument(skip(self, booking), fields(booking_id = %booking.booking_id))]
    async fn save(&self, booking: &Booking) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let booking = booking.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.execute(
                &format!(
                    "INSERT INTO bookings ({BOOKING_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                params![
                    booking.booking_id.to_string(),
                    booking.customer_name,
                    booking.number_of_guests,
                    booking.booking_date.to_string(),
                    booking.booking_time,
                    booking.location,
                    booking.cuisine_preference,
                    booking.special_requests,
                    booking.weather_info.as_ref().map(ToString::to_string),
                    booking.seating_preference.as_str(),
                    booking.status.as_str(),
                    timestamp(booking.created_at),
                    timestamp(booking.updated_at),
                ],
            )
            .map_err(map_db_error)?;

            debug!("Saved booking");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(booking_id = %id))]
    async fn get(&self, id: &BookingId) -> Result<Option<Booking>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            conn.query_row(
                &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
                [&id_str],
                row_to_booking,
            )
            .optional()
            .map_err(map_db_error)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.booking_id))]
    async fn update(&self, booking: &Booking) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let booking = booking.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let affected = conn
                .execute(
                    "UPDATE bookings SET
                        customer_name = ?1, number_of_guests = ?2, booking_date = ?3,
                        booking_time = ?4, location = ?5, cuisine_preference = ?6,
                        special_requests = ?7, weather_info = ?8, seating_preference = ?9,
                        status = ?10, updated_at = ?11
                     WHERE id = ?12",
                    params![
                        booking.customer_name,
                        booking.number_of_guests,
                        booking.booking_date.to_string(),
                        booking.booking_time,
                        booking.location,
                        booking.cuisine_preference,
                        booking.special_requests,
                        booking.weather_info.as_ref().map(ToString::to_string),
                        booking.seating_preference.as_str(),
                        booking.status.as_str(),
                        timestamp(booking.updated_at),
                        booking.booking_id.to_string(),
                    ],
                )
                .map_err(map_db_error)?;

            if affected == 0 {
                return Err(ApplicationError::NotFound(format!(
                    "Booking {} not found",
                    booking.booking_id
                )));
            }

            debug!("Updated booking");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Booking>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, i64::from);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT ?1"
                ))
                .map_err(map_db_error)?;

            let bookings = stmt
                .query_map([limit], row_to_booking)
                .map_err(map_db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_db_error)?;

            debug!(count = bookings.len(), "Listed bookings");
            Ok(bookings)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let date_str = date.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_db_error)?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings
                     WHERE booking_date = ?1
                     ORDER BY created_at ASC"
                ))
                .map_err(map_db_error)?;

            let bookings = stmt
                .query_map([&date_str], row_to_booking)
                .map_err(map_db_error)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(map_db_error)?;

            Ok(bookings)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Wrap a parse failure in a column conversion error
fn conversion_error(
    column: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, err.into())
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering
fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

/// Convert a database row to a `Booking`
fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let id: String = row.get(0)?;
    let booking_date: String = row.get(3)?;
    let weather_info: Option<String> = row.get(8)?;
    let seating: String = row.get(9)?;
    let status: String = row.get(10)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;

    Ok(Booking {
        booking_id: BookingId::parse(&id).map_err(|e| conversion_error(0, e))?,
        customer_name: row.get(1)?,
        number_of_guests: row.get(2)?,
        booking_date: NaiveDate::parse_from_str(&booking_date, "%Y-%m-%d")
            .map_err(|e| conversion_error(3, e))?,
        booking_time: row.get(4)?,
        location: row.get(5)?,
        cuisine_preference: row.get(6)?,
        special_requests: row.get(7)?,
        weather_info: weather_info
            .map(|w| serde_json::from_str(&w))
            .transpose()
            .map_err(|e| conversion_error(8, e))?,
        seating_preference: seating.parse().map_err(|e: &str| conversion_error(9, e))?,
        status: status.parse().map_err(|e: &str| conversion_error(10, e))?,
        created_at: parse_timestamp(11, &created_at)?,
        updated_at: parse_timestamp(12, &updated_at)?,
    })
}
