//! Coarse weather classification and the seating advice derived from it

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SeatingPreference;

/// Forecast condition reduced to what matters for seating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    Rainy,
    Cloudy,
    Mixed,
    Unknown,
}

impl WeatherCategory {
    /// Classify a provider condition text such as "Patchy light drizzle"
    ///
    /// `None` means the forecast had no data for the requested day.
    #[must_use]
    pub fn classify(condition: Option<&str>) -> Self {
        let Some(text) = condition else {
            return Self::Unknown;
        };
        let text = text.to_lowercase();

        if text.contains("sun") || text.contains("clear") {
            Self::Sunny
        } else if ["rain", "drizzle", "storm"]
            .iter()
            .any(|word| text.contains(word))
        {
            Self::Rainy
        } else if text.contains("cloud") {
            Self::Cloudy
        } else {
            Self::Mixed
        }
    }

    /// Canned seating suggestion for this category
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::Sunny => "The weather looks great! Outdoor seating would be a lovely choice.",
            Self::Rainy => {
                "It might rain. I recommend our cozy indoor seating for a comfortable experience."
            },
            Self::Cloudy => {
                "It looks a bit cloudy. Both indoor and outdoor seating are possible depending on your preference."
            },
            Self::Mixed | Self::Unknown => {
                "The forecast is a bit uncertain. Indoor seating is the safer option, but we can do outdoor if you prefer."
            },
        }
    }

    /// Seating to book given the forecast, keeping `current` when the
    /// weather does not settle it
    #[must_use]
    pub const fn recommended_seating(&self, current: SeatingPreference) -> SeatingPreference {
        match self {
            Self::Sunny => SeatingPreference::Outdoor,
            Self::Rainy => SeatingPreference::Indoor,
            Self::Cloudy | Self::Mixed | Self::Unknown => current,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WeatherCategory {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunny" => Ok(Self::Sunny),
            "rainy" => Ok(Self::Rainy),
            "cloudy" => Ok(Self::Cloudy),
            "mixed" => Ok(Self::Mixed),
            "unknown" => Ok(Self::Unknown),
            _ => Err("Invalid weather category"),
        }
    }
}
