//! Health aggregation service
//!
//! Readiness of the booking backend: the database is critical, the ML
//! service and weather provider are reported but optional since the API
//! degrades gracefully without them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{DatabaseHealthPort, TranscriptionPort, WeatherPort};

/// Default global timeout for health checks in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Global timeout for all health checks in seconds (default: 5)
    #[serde(default = "default_global_timeout")]
    pub global_timeout_secs: u64,

    /// Service-specific timeout overrides in seconds
    #[serde(default)]
    pub service_timeouts: HashMap<String, u64>,
}

const fn default_global_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_global_timeout(),
            service_timeouts: HashMap::new(),
        }
    }
}

impl HealthConfig {
    /// Get the timeout for a specific service
    #[must_use]
    pub fn timeout_for_service(&self, service: &str) -> Duration {
        let secs = self
            .service_timeouts
            .get(service)
            .copied()
            .unwrap_or(self.global_timeout_secs);
        Duration::from_secs(secs)
    }
}

/// Status of an individual service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Optional additional information (e.g., model name, version)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Response time in milliseconds (if check was performed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Create a healthy status
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            healthy: true,
            info: None,
            response_time_ms: None,
            error: None,
        }
    }

    /// Create a healthy status with additional info
    #[must_use]
    pub fn healthy_with_info(info: impl Into<String>) -> Self {
        Self {
            info: Some(info.into()),
            ..Self::healthy()
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Create an unhealthy status due to timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    /// Create a status for an unconfigured/disabled service
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            healthy: false,
            info: Some("Service not configured".to_string()),
            response_time_ms: None,
            error: None,
        }
    }

    /// Add response time to the status
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health report across all services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when every critical service is healthy
    pub healthy: bool,
    /// Individual service statuses
    pub services: HashMap<String, ServiceHealth>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Services whose failure makes the backend not ready
    pub const CRITICAL: [&'static str; 1] = ["database"];

    /// Create a new health report
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = Self::CRITICAL
            .iter()
            .all(|name| services.get(*name).is_some_and(|s| s.healthy));

        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Get status of a specific service
    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating health checks
#[derive(Default)]
pub struct HealthService {
    config: HealthConfig,
    database: Option<Arc<dyn DatabaseHealthPort>>,
    ml_service: Option<Arc<dyn TranscriptionPort>>,
    weather: Option<Arc<dyn WeatherPort>>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .field("database", &self.database.is_some())
            .field("ml_service", &self.ml_service.is_some())
            .field("weather", &self.weather.is_some())
            .finish()
    }
}

#[allow(clippy::cast_possible_truncation)] // Health check timeouts are seconds, far below u64::MAX ms
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl HealthService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the health check configuration
    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabaseHealthPort>) -> Self {
        self.database = Some(database);
        self
    }

    #[must_use]
    pub fn with_ml_service(mut self, ml_service: Arc<dyn TranscriptionPort>) -> Self {
        self.ml_service = Some(ml_service);
        self
    }

    #[must_use]
    pub fn with_weather(mut self, weather: Arc<dyn WeatherPort>) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Check health of all configured services
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (database, ml_service) = tokio::join!(self.check_database(), self.check_ml_service());

        let mut services = HashMap::new();
        services.insert("database".to_string(), database);
        services.insert("ml_service".to_string(), ml_service);
        services.insert("weather".to_string(), self.check_weather());

        HealthReport::new(services)
    }

    /// Check database connectivity
    #[instrument(skip(self))]
    pub async fn check_database(&self) -> ServiceHealth {
        let Some(ref database) = self.database else {
            return ServiceHealth::unconfigured();
        };

        let start = Instant::now();
        match timeout(
            self.config.timeout_for_service("database"),
            database.check_health(),
        )
        .await
        {
            Ok(Ok(health)) if health.reachable => {
                let response_time = elapsed_ms(start);
                debug!(response_time_ms = response_time, "Database healthy");
                ServiceHealth::healthy_with_info(health.describe()).with_response_time(response_time)
            },
            Ok(Ok(_)) => {
                warn!("Database unreachable");
                ServiceHealth::unhealthy("Database unreachable").with_response_time(elapsed_ms(start))
            },
            Ok(Err(e)) => {
                warn!(error = %e, "Database health check failed");
                ServiceHealth::unhealthy(e.to_string()).with_response_time(elapsed_ms(start))
            },
            Err(_) => {
                warn!("Database health check timed out");
                ServiceHealth::timeout()
            },
        }
    }

    /// Check the ML service
    #[instrument(skip(self))]
    pub async fn check_ml_service(&self) -> ServiceHealth {
        let Some(ref ml_service) = self.ml_service else {
            return ServiceHealth::unconfigured();
        };

        let start = Instant::now();
        match timeout(
            self.config.timeout_for_service("ml_service"),
            ml_service.health(),
        )
        .await
        {
            Ok(Ok(health)) if health.is_online() => {
                let info = health.model.unwrap_or(health.status);
                ServiceHealth::healthy_with_info(info).with_response_time(elapsed_ms(start))
            },
            Ok(Ok(health)) => {
                warn!(status = %health.status, "ML service not online");
                ServiceHealth::unhealthy(format!("ML service status: {}", health.status))
                    .with_response_time(elapsed_ms(start))
            },
            Ok(Err(e)) => {
                warn!(error = %e, "ML service health check failed");
                ServiceHealth::unhealthy(e.to_string()).with_response_time(elapsed_ms(start))
            },
            Err(_) => {
                warn!("ML service health check timed out");
                ServiceHealth::timeout()
            },
        }
    }

    /// The weather provider is not probed; only its credentials are checked
    pub fn check_weather(&self) -> ServiceHealth {
        match self.weather {
            Some(ref weather) if weather.is_configured() => ServiceHealth::healthy(),
            _ => ServiceHealth::unconfigured(),
        }
    }
}
