//! Booking status value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Seats are held for the guest
    #[default]
    Confirmed,
    /// Awaiting confirmation
    Pending,
    /// Cancelled by the guest or staff; seats are released
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status occupies seats in its hour slot
    #[must_use]
    pub const fn holds_seats(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Pending)
    }

    /// Storage/wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "pending" => Ok(Self::Pending),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err("Invalid booking status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_confirmed() {
        assert_eq!(BookingStatus::default(), BookingStatus::Confirmed);
    }

    #[test]
    fn cancelled_releases_seats() {
        assert!(BookingStatus::Confirmed.holds_seats());
        assert!(BookingStatus::Pending.holds_seats());
        assert!(!BookingStatus::Cancelled.holds_seats());
    }

    #[test]
    fn from_str_accepts_storage_values() {
        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Pending,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert_eq!(
            "Canceled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn serialization() {
        let json = serde_json::to_string(&BookingStatus::Cancelled).unwrap();
        assert_eq!(json, r#""cancelled""#);
    }
}
