//! Weather service port
//!
//! Defines the interface for retrieving a day's forecast for a place.

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A provider forecast for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Provider response as received, kept for the booking record
    pub raw: serde_json::Value,
    /// Condition text of the requested day, e.g. "Patchy rain possible"
    ///
    /// `None` when the provider returned no data for that day.
    pub condition_text: Option<String>,
}

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Get the forecast for `location` on `date`
    ///
    /// # Arguments
    /// * `location` - Free-form place name, e.g. a city
    /// * `date` - Day of the visit
    async fn get_forecast(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<ForecastReport, ApplicationError>;

    /// Whether credentials for the provider are present
    fn is_configured(&self) -> bool;
}
