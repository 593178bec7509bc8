//! Booking rules configuration.

use domain::value_objects::{DEFAULT_GUESTS_PER_HOUR, SlotCapacity};
use serde::{Deserialize, Serialize};

/// Restaurant seating rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingAppConfig {
    /// Guests that can be seated per hour slot (default: 30)
    #[serde(default = "default_capacity")]
    pub capacity_per_hour: u32,
}

const fn default_capacity() -> u32 {
    DEFAULT_GUESTS_PER_HOUR
}

impl Default for BookingAppConfig {
    fn default() -> Self {
        Self {
            capacity_per_hour: default_capacity(),
        }
    }
}

impl BookingAppConfig {
    #[must_use]
    pub const fn slot_capacity(&self) -> SlotCapacity {
        SlotCapacity::new(self.capacity_per_hour)
    }
}
