//! Persistence module
//!
//! SQLite-based storage for bookings.

pub mod booking_store;
pub mod connection;
pub mod database_health;
pub mod error;
pub mod migrations;

pub use booking_store::SqliteBookingStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use database_health::SqliteDatabaseHealth;
pub use error::map_db_error;
