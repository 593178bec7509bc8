//! Hour slot derived from a free-form booking time
//!
//! Booking times arrive as spoken labels ("7 pm", "19:30", "7:30 p.m.").
//! Capacity is tracked per hour, so every label is reduced to the hour it
//! starts in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The hour of day (0-23) a booking falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourSlot(u8);

impl HourSlot {
    /// Create a slot from a 24h hour
    #[must_use]
    pub const fn new(hour: u8) -> Option<Self> {
        if hour < 24 { Some(Self(hour)) } else { None }
    }

    /// Derive the slot from a time label
    ///
    /// The hour is the first run of one or two digits. A trailing `am`/`pm`
    /// marker moves it onto the 24h clock, so "7 pm" and "19:00" share a
    /// slot while "7 am" does not. Labels without digits have no slot.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        let start = lower.find(|c: char| c.is_ascii_digit())?;
        let digits: String = lower[start..]
            .chars()
            .take_while(char::is_ascii_digit)
            .take(2)
            .collect();
        let hour: u8 = digits.parse().ok()?;

        let compact: String = lower[start..].chars().filter(|c| *c != '.').collect();
        let hour = if hour <= 12 && compact.contains("pm") {
            if hour == 12 { 12 } else { hour + 12 }
        } else if hour == 12 && compact.contains("am") {
            0
        } else {
            hour
        };

        Self::new(hour)
    }

    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}
