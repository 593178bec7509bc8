//! Booking entity - A table reservation for one party at one date and time

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{BookingId, BookingStatus, HourSlot, SeatingPreference};

/// A table reservation
///
/// Serialized in camelCase; this is the shape clients post and receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Public identifier
    pub booking_id: BookingId,
    /// Name the table is held under
    pub customer_name: String,
    /// Party size, at least one
    pub number_of_guests: u32,
    /// Calendar day of the visit
    pub booking_date: NaiveDate,
    /// Time as the customer said it, e.g. "7 pm"
    pub booking_time: String,
    /// City the customer asked for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    /// Forecast snapshot taken when the booking was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_info: Option<serde_json::Value>,
    #[serde(default)]
    pub seating_preference: SeatingPreference,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new confirmed booking with a fresh identifier
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        number_of_guests: u32,
        booking_date: NaiveDate,
        booking_time: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            booking_id: BookingId::new(),
            customer_name: customer_name.into(),
            number_of_guests,
            booking_date,
            booking_time: booking_time.into(),
            location: None,
            cuisine_preference: None,
            special_requests: None,
            weather_info: None,
            seating_preference: SeatingPreference::default(),
            status: BookingStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_cuisine_preference(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine_preference = Some(cuisine.into());
        self
    }

    #[must_use]
    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = Some(requests.into());
        self
    }

    #[must_use]
    pub fn with_weather_info(mut self, weather: serde_json::Value) -> Self {
        self.weather_info = Some(weather);
        self
    }

    #[must_use]
    pub const fn with_seating_preference(mut self, seating: SeatingPreference) -> Self {
        self.seating_preference = seating;
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Hour slot this booking occupies, if its time label names an hour
    #[must_use]
    pub fn hour_slot(&self) -> Option<HourSlot> {
        HourSlot::from_label(&self.booking_time)
    }

    /// Whether this booking's guests count against its slot's capacity
    #[must_use]
    pub const fn counts_toward_capacity(&self) -> bool {
        self.status.holds_seats()
    }

    /// Release the table. Cancelling twice is harmless.
    pub fn cancel(&mut self) {
        if self.status != BookingStatus::Cancelled {
            self.status = BookingStatus::Cancelled;
            self.updated_at = Utc::now();
        }
    }
}
