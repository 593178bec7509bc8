//! Seating preference value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the party would like to be seated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeatingPreference {
    Indoor,
    Outdoor,
    #[default]
    Unspecified,
}

impl SeatingPreference {
    /// Storage/wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Unspecified => "unspecified",
        }
    }

    #[must_use]
    pub const fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for SeatingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeatingPreference {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "indoor" | "inside" => Ok(Self::Indoor),
            "outdoor" | "outside" => Ok(Self::Outdoor),
            "unspecified" | "" => Ok(Self::Unspecified),
            _ => Err("Invalid seating preference"),
        }
    }
}
