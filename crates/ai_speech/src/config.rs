//! Configuration for the ML service client

use serde::{Deserialize, Serialize};

/// Connection settings for the speech/validation ML service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlServiceConfig {
    /// Base URL of the ML service (default: http://localhost:5001)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for `/transcribe` requests in milliseconds
    #[serde(default = "default_transcribe_timeout_ms")]
    pub transcribe_timeout_ms: u64,

    /// Timeout for `/validate_request` requests in milliseconds
    #[serde(default = "default_validate_timeout_ms")]
    pub validate_timeout_ms: u64,

    /// Timeout for `/health` probes in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,

    /// Largest audio upload forwarded to the service, in bytes
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

const fn default_transcribe_timeout_ms() -> u64 {
    30_000
}

const fn default_validate_timeout_ms() -> u64 {
    15_000
}

const fn default_health_timeout_ms() -> u64 {
    2_000
}

const fn default_max_audio_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for MlServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            transcribe_timeout_ms: default_transcribe_timeout_ms(),
            validate_timeout_ms: default_validate_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

impl MlServiceConfig {
    /// Config pointing at a service on localhost with the given port
    #[must_use]
    pub fn for_port(port: u16) -> Self {
        Self {
            base_url: format!("http://localhost:{port}"),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "ML service URL must start with http:// or https://, got {}",
                self.base_url
            ));
        }

        if self.transcribe_timeout_ms == 0
            || self.validate_timeout_ms == 0
            || self.health_timeout_ms == 0
        {
            return Err("Timeouts must be greater than 0".to_string());
        }

        if self.max_audio_bytes == 0 {
            return Err("Max audio size must be greater than 0".to_string());
        }

        Ok(())
    }
}
