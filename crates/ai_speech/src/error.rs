//! ML service client errors

use thiserror::Error;

/// Errors that can occur while talking to the ML service
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to the ML service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid audio format or empty upload
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded its timeout
    #[error("ML service timeout after {0}ms")]
    Timeout(u64),

    /// Service reported a server-side failure
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Classify a transport error, attributing timeouts to `timeout_ms`
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Whether retrying later might succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::ServiceUnavailable(_)
        )
    }
}
