//! Booking storage port
//!
//! Defines the interface for persisting and querying bookings.
//! Adapters in the infrastructure layer implement this port using SQLite.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::Booking;
use domain::value_objects::BookingId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for booking persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: &Booking) -> Result<(), ApplicationError>;

    /// Get a booking by its public ID
    async fn get(&self, id: &BookingId) -> Result<Option<Booking>, ApplicationError>;

    /// Overwrite an existing booking
    async fn update(&self, booking: &Booking) -> Result<(), ApplicationError>;

    /// List bookings, newest first
    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Booking>, ApplicationError>;

    /// All bookings on a calendar day, regardless of status
    async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Booking>, ApplicationError>;
}
