//! API error handling
//!
//! Maps application errors onto the JSON bodies clients rely on. Upstream
//! service failures carry their message in `details`; internal failures
//! only do so outside production.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, value_objects::CapacityExceeded};
use serde::Serialize;
use thiserror::Error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
///
/// Set to `false` in production so database and I/O messages stay in
/// the logs.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    CapacityExceeded(CapacityExceeded),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborator (weather provider, ML service) failed
    #[error("{error}: {details}")]
    Upstream { error: String, details: String },

    #[error("{error}")]
    Internal {
        error: String,
        details: Option<String>,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body returned when an hour slot cannot seat the party
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityExceededResponse {
    /// Always `CAPACITY_EXCEEDED`
    pub error: &'static str,
    pub message: String,
    pub available_capacity: u32,
    pub requested_guests: u32,
    pub total_capacity: u32,
}

impl From<&CapacityExceeded> for CapacityExceededResponse {
    fn from(exceeded: &CapacityExceeded) -> Self {
        Self {
            error: "CAPACITY_EXCEEDED",
            message: exceeded.message(),
            available_capacity: exceeded.available,
            requested_guests: exceeded.requested,
            total_capacity: exceeded.total,
        }
    }
}

impl ApiError {
    /// Map an application error, using `failure` as the message for
    /// server-side failures
    pub fn from_application(err: ApplicationError, failure: &str) -> Self {
        match err {
            ApplicationError::Domain(DomainError::CapacityExceeded(exceeded)) => {
                Self::CapacityExceeded(exceeded)
            },
            ApplicationError::Domain(DomainError::NotFound { entity_type, .. }) => {
                Self::NotFound(format!("{entity_type} not found"))
            },
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidOperation(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ExternalService(msg) => Self::Upstream {
                error: failure.to_string(),
                details: msg,
            },
            ApplicationError::Configuration(msg) => Self::Internal {
                error: msg,
                details: None,
            },
            ApplicationError::Internal(msg) => Self::Internal {
                error: failure.to_string(),
                details: Some(msg),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::CapacityExceeded(exceeded) => {
                let body = CapacityExceededResponse::from(&exceeded);
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            },
            Self::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error,
                    details: None,
                },
            ),
            Self::NotFound(error) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error,
                    details: None,
                },
            ),
            Self::Upstream { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error,
                    details: Some(details),
                },
            ),
            Self::Internal { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error,
                    details: details.filter(|_| should_expose_details()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exceeded() -> CapacityExceeded {
        CapacityExceeded {
            available: 2,
            requested: 5,
            total: 30,
            time: "7 pm".into(),
        }
    }

    #[test]
    fn capacity_error_becomes_capacity_exceeded() {
        let err = ApiError::from_application(exceeded().into(), "Failed to create booking");
        assert!(matches!(err, ApiError::CapacityExceeded(ref e) if e.available == 2));
    }

    #[test]
    fn capacity_body_uses_camel_case() {
        let body = serde_json::to_value(CapacityExceededResponse::from(&exceeded())).unwrap();
        assert_eq!(body["error"], "CAPACITY_EXCEEDED");
        assert_eq!(body["availableCapacity"], 2);
        assert_eq!(body["requestedGuests"], 5);
        assert_eq!(body["totalCapacity"], 30);
        assert!(body["message"].as_str().unwrap().contains("2 more guests at 7 pm"));
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let source = ApplicationError::Domain(DomainError::ValidationError("bad".into()));
        let err = ApiError::from_application(source, "x");
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = ApiError::from_application(ApplicationError::InvalidOperation("no".into()), "x");
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "no"));
    }

    #[test]
    fn not_found_keeps_message() {
        let source = ApplicationError::NotFound("Booking not found".into());
        let err = ApiError::from_application(source, "x");
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Booking not found"));
    }

    #[test]
    fn external_failure_keeps_details() {
        let source = ApplicationError::ExternalService("connection refused".into());
        let err = ApiError::from_application(source, "Transcription failed");
        let ApiError::Upstream { error, details } = err else {
            unreachable!("Expected Upstream");
        };
        assert_eq!(error, "Transcription failed");
        assert_eq!(details, "connection refused");
    }

    #[test]
    fn configuration_message_is_the_error() {
        let source = ApplicationError::Configuration("Weather API key not configured".into());
        let err = ApiError::from_application(source, "Failed to fetch weather information");
        assert!(
            matches!(err, ApiError::Internal { ref error, .. } if error == "Weather API key not configured")
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::CapacityExceeded(exceeded()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal {
                error: "x".into(),
                details: None
            }
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_omits_empty_details() {
        let body = ErrorResponse {
            error: "Booking not found".into(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Booking not found"}"#
        );
    }
}
