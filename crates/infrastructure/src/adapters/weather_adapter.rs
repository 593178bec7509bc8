//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{ForecastReport, WeatherPort};
use async_trait::async_trait;
use chrono::NaiveDate;
use integration_weather::{WeatherApiClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter for the WeatherAPI.com forecast service
pub struct WeatherApiAdapter {
    client: WeatherApiClient,
}

impl std::fmt::Debug for WeatherApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiAdapter")
            .field("client", &"WeatherApiClient")
            .field("configured", &self.client.is_configured())
            .finish()
    }
}

impl WeatherApiAdapter {
    /// Create an adapter from client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = WeatherApiClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey => ApplicationError::Configuration(err.to_string()),
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::Unauthorized(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Unreadable forecast: {e}"))
            },
            WeatherError::RateLimitExceeded => ApplicationError::ExternalService(err.to_string()),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherApiAdapter {
    #[instrument(skip(self))]
    async fn get_forecast(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<ForecastReport, ApplicationError> {
        let forecast = self
            .client
            .forecast(location, date)
            .await
            .map_err(Self::map_error)?;

        let condition_text = forecast.condition_text().map(str::to_string);
        debug!(condition = ?condition_text, "Fetched forecast");

        Ok(ForecastReport {
            raw: forecast.raw,
            condition_text,
        })
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }
}
