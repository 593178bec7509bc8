//! Booking database readiness port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// What a readiness probe learned about the booking database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Engine and version, e.g. "SQLite 3.46.0"
    pub engine: Option<String>,
    /// Last applied schema migration
    pub schema_version: Option<i32>,
    /// Rows in the bookings table, cancelled ones included
    pub bookings: Option<u64>,
}

impl DatabaseHealth {
    #[must_use]
    pub fn reachable(engine: impl Into<String>) -> Self {
        Self {
            reachable: true,
            engine: Some(engine.into()),
            schema_version: None,
            bookings: None,
        }
    }

    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            engine: None,
            schema_version: None,
            bookings: None,
        }
    }

    #[must_use]
    pub const fn with_schema_version(mut self, version: i32) -> Self {
        self.schema_version = Some(version);
        self
    }

    #[must_use]
    pub const fn with_bookings(mut self, count: u64) -> Self {
        self.bookings = Some(count);
        self
    }

    /// One-line summary for the readiness report
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(engine) = &self.engine {
            parts.push(engine.clone());
        }
        if let Some(version) = self.schema_version {
            parts.push(format!("schema v{version}"));
        }
        if let Some(count) = self.bookings {
            parts.push(format!("{count} booking{}", if count == 1 { "" } else { "s" }));
        }
        parts.join(", ")
    }
}

/// Port for probing the booking database
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Query the database and report what it holds
    ///
    /// An error means the database cannot serve bookings.
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
