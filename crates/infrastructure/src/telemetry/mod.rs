//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the configured filter so operators can raise
//! verbosity without touching the config file.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, TelemetryAppConfig};

/// Build the filter from `RUST_LOG`, falling back to the configured directive
pub fn env_filter(config: &TelemetryAppConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing(config: &TelemetryAppConfig) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match config.log_format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    }
}
