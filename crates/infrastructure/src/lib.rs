//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite booking
//! storage, the WeatherAPI.com forecast and the Python ML service. Also
//! owns configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, BookingAppConfig, DatabaseConfig, Environment, LogFormat, ServerConfig,
    TelemetryAppConfig, WeatherAppConfig,
};
pub use persistence::{
    ConnectionPool, SqliteBookingStore, SqliteDatabaseHealth, create_pool, map_db_error,
};
pub use telemetry::init_tracing;
