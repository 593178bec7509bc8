//! Booking draft - Fields collected so far during a voice conversation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Cuisine, SeatingPreference};

/// A booking being filled in, one answer at a time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub customer_name: Option<String>,
    pub location: Option<String>,
    pub number_of_guests: Option<u32>,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<String>,
    pub cuisine: Option<Cuisine>,
    pub special_requests: Option<String>,
    pub seating_preference: SeatingPreference,
}

impl BookingDraft {
    /// Labels of the required fields that are still empty
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.as_deref().is_none_or(str::is_empty) {
            missing.push("name");
        }
        if self.number_of_guests.is_none_or(|n| n == 0) {
            missing.push("guests");
        }
        if self.booking_date.is_none() {
            missing.push("date");
        }
        if self.booking_time.as_deref().is_none_or(str::is_empty) {
            missing.push("time");
        }
        missing
    }

    /// Whether the draft can be submitted
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.missing_required().is_empty()
    }
}
