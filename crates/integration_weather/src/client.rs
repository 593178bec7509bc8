//! WeatherAPI.com client
//!
//! HTTP client for the WeatherAPI.com forecast endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, Forecast};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key rejected by the provider
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// No API key configured
    #[error("Weather API key not configured")]
    MissingApiKey,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI.com base URL (default: <https://api.weatherapi.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (excluded from serialization to prevent leaks)
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl WeatherConfig {
    /// Whether a non-empty API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the forecast for `location` on `date`
    async fn forecast(&self, location: &str, date: NaiveDate) -> Result<Forecast, WeatherError>;

    /// Whether the client has credentials to make requests
    fn is_configured(&self) -> bool;
}

/// WeatherAPI.com HTTP client implementation
#[derive(Debug)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherApiClient {
    /// Create a new WeatherAPI.com client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.config.base_url.trim_end_matches('/'))
    }

    /// Map a non-success response to an error, preferring the provider's message
    fn status_error(status: StatusCode, body: &str) -> WeatherError {
        let detail = serde_json::from_str::<ApiErrorBody>(body).map_or_else(
            |_| format!("HTTP {status}"),
            |b| match b.error.code {
                Some(code) => format!("{} (code {code})", b.error.message),
                None => b.error.message,
            },
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WeatherError::Unauthorized(detail),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(detail),
            _ => WeatherError::RequestFailed(detail),
        }
    }
}

#[async_trait]
impl WeatherClient for WeatherApiClient {
    #[instrument(skip(self), fields(date = %date))]
    async fn forecast(&self, location: &str, date: NaiveDate) -> Result<Forecast, WeatherError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        let dt = date.format("%Y-%m-%d").to_string();
        debug!(location = %location, "Fetching forecast");

        let response = self
            .client
            .get(self.forecast_url())
            .query(&[("key", api_key), ("q", location), ("dt", dt.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    WeatherError::ConnectionFailed(e.to_string())
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = Self::status_error(status, &body);
            warn!(status = %status, error = %error, "Weather request rejected");
            return Err(error);
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let forecast = Forecast::from_raw(raw);
        debug!(condition = ?forecast.condition_text(), "Forecast received");
        Ok(forecast)
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }
}
