//! Steps of the voice booking conversation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the booking conversation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStep {
    #[default]
    Name,
    City,
    Guests,
    #[serde(rename = "datetime")]
    DateTime,
    Cuisine,
    Special,
    Confirm,
}

impl DialogueStep {
    /// Steps in conversation order
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::City,
        Self::Guests,
        Self::DateTime,
        Self::Cuisine,
        Self::Special,
        Self::Confirm,
    ];

    /// Label shown in the progress indicator
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::City => "City",
            Self::Guests => "Guests",
            Self::DateTime => "Date & time",
            Self::Cuisine => "Cuisine",
            Self::Special => "Special requests",
            Self::Confirm => "Confirm",
        }
    }

    /// Zero-based position in the conversation
    #[must_use]
    pub const fn position(&self) -> usize {
        *self as usize
    }

    /// The step after this one; `Confirm` is final
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Name => Self::City,
            Self::City => Self::Guests,
            Self::Guests => Self::DateTime,
            Self::DateTime => Self::Cuisine,
            Self::Cuisine => Self::Special,
            Self::Special | Self::Confirm => Self::Confirm,
        }
    }
}

impl fmt::Display for DialogueStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
