//! Weather data models
//!
//! Typed view over the parts of a WeatherAPI.com forecast response that
//! TableTalk reads. The full payload is kept as raw JSON for clients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Forecast for a single day at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Resolved location name (e.g., "Berlin, Germany")
    pub location: Option<String>,
    /// Summary of the requested day, when the provider returned one
    pub day: Option<DayCondition>,
    /// Untouched provider payload
    pub raw: Value,
}

impl Forecast {
    /// Build a forecast from a raw provider payload
    ///
    /// Missing sections are tolerated; only the JSON itself must be valid.
    #[must_use]
    pub fn from_raw(raw: Value) -> Self {
        let parsed: ApiResponse = serde_json::from_value(raw.clone()).unwrap_or_default();

        let location = parsed.location.map(|l| match l.country {
            Some(country) if !country.is_empty() => format!("{}, {country}", l.name),
            _ => l.name,
        });

        let day = parsed
            .forecast
            .and_then(|f| f.forecastday.into_iter().next())
            .map(|fd| DayCondition {
                date: NaiveDate::parse_from_str(&fd.date, "%Y-%m-%d").ok(),
                text: fd.day.condition.map(|c| c.text),
                max_temp_c: fd.day.maxtemp_c,
                min_temp_c: fd.day.mintemp_c,
                chance_of_rain: fd.day.daily_chance_of_rain,
            });

        Self { location, day, raw }
    }

    /// Condition text of the forecast day (e.g., "Patchy rain nearby")
    #[must_use]
    pub fn condition_text(&self) -> Option<&str> {
        self.day.as_ref().and_then(|d| d.text.as_deref())
    }
}

/// Daily summary extracted from `forecast.forecastday[0].day`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCondition {
    pub date: Option<NaiveDate>,
    pub text: Option<String>,
    pub max_temp_c: Option<f64>,
    pub min_temp_c: Option<f64>,
    /// Percent chance of rain (0-100)
    pub chance_of_rain: Option<u8>,
}

// ============================================================================
// Raw API response structures
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub location: Option<ApiLocation>,
    #[serde(default)]
    pub forecast: Option<ApiForecast>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLocation {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecast {
    #[serde(default)]
    pub forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastDay {
    pub date: String,
    pub day: ApiDay,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDay {
    #[serde(default)]
    pub maxtemp_c: Option<f64>,
    #[serde(default)]
    pub mintemp_c: Option<f64>,
    #[serde(default)]
    pub daily_chance_of_rain: Option<u8>,
    #[serde(default)]
    pub condition: Option<ApiCondition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    pub text: String,
}

/// Error envelope returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}
