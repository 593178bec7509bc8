//! Weather-based seating advice

use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use domain::value_objects::WeatherCategory;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::WeatherPort};

/// Forecast for a visit plus the seating suggestion drawn from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAdvice {
    /// Provider response as received
    pub raw: serde_json::Value,
    pub condition: WeatherCategory,
    pub suggestion: String,
}

/// Looks up the forecast for a booking and turns it into advice
#[derive(Clone)]
pub struct WeatherAdvisor {
    weather: Arc<dyn WeatherPort>,
}

impl fmt::Debug for WeatherAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherAdvisor")
            .field("configured", &self.weather.is_configured())
            .finish()
    }
}

impl WeatherAdvisor {
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>) -> Self {
        Self { weather }
    }

    /// Advise on seating for `location` on `date`
    ///
    /// `date` is the ISO form `YYYY-MM-DD`. Both arguments are required.
    #[instrument(skip(self))]
    pub async fn advise(&self, date: &str, location: &str) -> Result<WeatherAdvice, ApplicationError> {
        let (date, location) = (date.trim(), location.trim());
        if date.is_empty() || location.is_empty() {
            return Err(ApplicationError::InvalidOperation(
                "date and location are required".to_string(),
            ));
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ApplicationError::InvalidOperation(format!("date must be YYYY-MM-DD, got '{date}'"))
        })?;

        if !self.weather.is_configured() {
            return Err(ApplicationError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let report = self.weather.get_forecast(location, date).await?;
        let condition = WeatherCategory::classify(report.condition_text.as_deref());
        debug!(text = ?report.condition_text, %condition, "Classified forecast");

        Ok(WeatherAdvice {
            raw: report.raw,
            condition,
            suggestion: condition.suggestion().to_string(),
        })
    }
}
