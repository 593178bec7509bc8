//! Per-hour seating capacity

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ceiling of guests seated within one hour slot
pub const DEFAULT_GUESTS_PER_HOUR: u32 = 30;

/// Fixed ceiling of guests per date and hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCapacity {
    total: u32,
}

impl SlotCapacity {
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self { total }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Seats still free given the guests already booked in the slot
    #[must_use]
    pub const fn available(&self, already_booked: u32) -> u32 {
        self.total.saturating_sub(already_booked)
    }

    /// Admit `requested` guests into a slot already holding `already_booked`
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] when the slot would go over its ceiling.
    pub fn check(
        &self,
        time_label: &str,
        already_booked: u32,
        requested: u32,
    ) -> Result<(), CapacityExceeded> {
        if already_booked.saturating_add(requested) > self.total {
            return Err(CapacityExceeded {
                available: self.available(already_booked),
                requested,
                total: self.total,
                time: time_label.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SlotCapacity {
    fn default() -> Self {
        Self::new(DEFAULT_GUESTS_PER_HOUR)
    }
}

/// A booking did not fit into its hour slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct CapacityExceeded {
    /// Seats still free in the slot
    pub available: u32,
    /// Guests the booking asked for
    pub requested: u32,
    /// Slot ceiling
    pub total: u32,
    /// Time label as given by the customer
    pub time: String,
}

impl CapacityExceeded {
    /// Customer-facing explanation, suitable for reading aloud
    #[must_use]
    pub fn message(&self) -> String {
        let plural = if self.available == 1 { "" } else { "s" };
        format!(
            "Sorry, we can only accommodate {} more guest{plural} at {}. \
             Please choose a different time or reduce the number of guests.",
            self.available, self.time
        )
    }
}
