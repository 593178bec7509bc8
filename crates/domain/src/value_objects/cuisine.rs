//! Cuisines offered by the restaurant

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the cuisines on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Indian,
    Chinese,
}

impl Cuisine {
    /// All offered cuisines, in the order they are matched against speech
    pub const ALL: [Self; 3] = [Self::Italian, Self::Indian, Self::Chinese];

    /// Find the first offered cuisine mentioned anywhere in `text`
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|cuisine| lower.contains(cuisine.keyword()))
    }

    /// Lower-case keyword used for matching
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Italian => "italian",
            Self::Indian => "indian",
            Self::Chinese => "chinese",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Italian => "Italian",
            Self::Indian => "Indian",
            Self::Chinese => "Chinese",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
