//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `booking`: Seating capacity rules
//! - `integrations`: WeatherAPI.com
//! - `telemetry`: Log filter and format
//!
//! The ML service section reuses [`ai_speech::MlServiceConfig`] and the
//! readiness timeouts reuse [`application::HealthConfig`].
//!
//! Sources, lowest precedence first: struct defaults, `config.toml`,
//! `TABLETALK__*` environment variables, then the legacy variables
//! (`WEATHER_API_KEY`, `weather_api_key`, `WEATHERAPI_KEY`, `ML_PORT`)
//! for values still unset.

mod booking;
mod database;
mod integrations;
mod server;
mod telemetry;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use ai_speech::MlServiceConfig;
use application::HealthConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use booking::BookingAppConfig;
pub use database::DatabaseConfig;
pub use integrations::WeatherAppConfig;
pub use server::ServerConfig;
pub use telemetry::{LogFormat, TelemetryAppConfig};

/// Prefix for environment overrides, e.g. `TABLETALK__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TABLETALK";

/// Legacy weather key variables, checked in order
const LEGACY_WEATHER_KEYS: [&str; 3] = ["WEATHER_API_KEY", "weather_api_key", "WEATHERAPI_KEY"];

/// Legacy variable holding the ML service port on localhost
const LEGACY_ML_PORT: &str = "ML_PORT";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed warnings
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Seating rules
    #[serde(default)]
    pub booking: BookingAppConfig,

    /// WeatherAPI.com configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// ML service (transcription and request validation)
    #[serde(default)]
    pub ml_service: MlServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,

    /// Readiness check timeouts
    #[serde(default)]
    pub health: HealthConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(Self::env_source(None))
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(app)
    }

    /// Load configuration from an explicit file and environment map
    ///
    /// The map replaces the process environment for both the prefixed and
    /// the legacy variables, which keeps loading deterministic in tests.
    pub fn load_from(
        file: &Path,
        env: HashMap<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(Self::env_source(Some(env.clone())))
            .build()?;

        let mut app: Self = config.try_deserialize()?;
        app.apply_legacy_env(|key| env.get(key).cloned());
        Ok(app)
    }

    fn env_source(source: Option<HashMap<String, String>>) -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .try_parsing(true)
            .source(source)
    }

    /// Fill unset values from the legacy environment variables
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.weather.has_api_key() {
            let legacy_key = LEGACY_WEATHER_KEYS.iter().find_map(|name| {
                lookup(name)
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (*name, v))
            });
            if let Some((name, key)) = legacy_key {
                debug!(variable = name, "Using legacy weather API key variable");
                self.weather.api_key = Some(SecretString::from(key.trim().to_string()));
            }
        }

        let default_ml_url = self.ml_service.base_url == MlServiceConfig::default().base_url;
        let legacy_port = lookup(LEGACY_ML_PORT)
            .filter(|_| default_ml_url)
            .and_then(|p| p.trim().parse::<u16>().ok());
        if let Some(port) = legacy_port {
            debug!(port, "Using legacy ML service port variable");
            self.ml_service.base_url = MlServiceConfig::for_port(port).base_url;
        }
    }

    /// Effective environment, defaulting to development
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Non-fatal configuration problems to report at startup
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.weather.has_api_key() {
            warnings.push(
                "Weather API key not configured; weather lookups will fail \
                 (set TABLETALK__WEATHER__API_KEY or WEATHER_API_KEY)"
                    .to_string(),
            );
        }

        if self.environment() == Environment::Production
            && self.server.cors_enabled
            && self.server.allowed_origins.is_empty()
        {
            warnings.push("CORS allows all origins in production".to_string());
        }

        if self.booking.capacity_per_hour == 0 {
            warnings.push("Booking capacity is 0; every booking will be rejected".to_string());
        }

        if let Err(e) = self.ml_service.validate() {
            warnings.push(format!("ML service configuration invalid: {e}"));
        }

        warnings
    }
}
