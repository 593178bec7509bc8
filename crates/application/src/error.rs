//! Application-level errors

use domain::{CapacityExceeded, DomainError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request is well-formed but cannot be carried out
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }

    /// The capacity rejection carried by this error, if any
    pub fn capacity_exceeded(&self) -> Option<&CapacityExceeded> {
        match self {
            Self::Domain(DomainError::CapacityExceeded(exceeded)) => Some(exceeded),
            _ => None,
        }
    }
}

impl From<CapacityExceeded> for ApplicationError {
    fn from(exceeded: CapacityExceeded) -> Self {
        Self::Domain(DomainError::CapacityExceeded(exceeded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_service_is_retryable() {
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
        assert!(!ApplicationError::NotFound("booking".into()).is_retryable());
    }

    #[test]
    fn capacity_exceeded_is_reachable_through_domain() {
        let err = ApplicationError::from(CapacityExceeded {
            available: 1,
            requested: 3,
            total: 30,
            time: "7 pm".into(),
        });
        let exceeded = err.capacity_exceeded().unwrap();
        assert_eq!(exceeded.available, 1);
        assert!(
            ApplicationError::Internal("x".into())
                .capacity_exceeded()
                .is_none()
        );
    }
}
