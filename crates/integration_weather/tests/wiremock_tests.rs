//! Integration tests for the WeatherAPI.com client using wiremock
//!
//! These tests verify HTTP behavior against a mocked forecast endpoint.

use chrono::NaiveDate;
use integration_weather::{WeatherApiClient, WeatherClient, WeatherConfig, WeatherError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Test helpers
// ============================================================================

fn sample_forecast_response(condition: &str) -> serde_json::Value {
    json!({
        "location": {
            "name": "Berlin",
            "region": "Berlin",
            "country": "Germany",
            "lat": 52.52,
            "lon": 13.4,
            "localtime": "2026-10-16 12:00"
        },
        "current": {
            "temp_c": 12.0,
            "condition": {"text": "Partly cloudy", "code": 1003}
        },
        "forecast": {
            "forecastday": [{
                "date": "2026-10-20",
                "day": {
                    "maxtemp_c": 15.3,
                    "mintemp_c": 7.8,
                    "daily_chance_of_rain": 10,
                    "condition": {"text": condition, "code": 1000}
                }
            }]
        }
    })
}

fn visit_date() -> NaiveDate {
    #[allow(clippy::expect_used)]
    NaiveDate::from_ymd_opt(2026, 10, 20).expect("valid date")
}

/// Create a test client pointing to the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> WeatherApiClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    WeatherApiClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /forecast.json endpoint with the given response
async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_forecast_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_forecast_response("Sunny")),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", visit_date()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let forecast = result.unwrap();
    assert_eq!(forecast.condition_text(), Some("Sunny"));
    assert_eq!(forecast.location.as_deref(), Some("Berlin, Germany"));
    assert_eq!(forecast.raw["current"]["temp_c"], json!(12.0));
}

#[tokio::test]
async fn test_forecast_without_forecast_section() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({"location": {"name": "Berlin"}})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let forecast = client.forecast("Berlin", visit_date()).await.unwrap();

    assert!(forecast.condition_text().is_none());
}

// ============================================================================
// Query parameter verification
// ============================================================================

#[tokio::test]
async fn test_request_contains_correct_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "New York"))
        .and(query_param("dt", "2026-10-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response("Sunny")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("New York", visit_date()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_missing_api_key_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: None,
        timeout_secs: 5,
    };
    let client = WeatherApiClient::new(config).unwrap();

    let result = client.forecast("Berlin", visit_date()).await;
    assert!(matches!(result, Err(WeatherError::MissingApiKey)));
}

// ============================================================================
// Error scenarios
// ============================================================================

#[tokio::test]
async fn test_unknown_location_is_request_failed() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Atlantis", visit_date()).await;

    match result {
        Err(WeatherError::RequestFailed(msg)) => {
            assert!(msg.contains("No matching location found."), "got: {msg}");
        },
        other => panic!("Expected RequestFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_key_is_unauthorized() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": 2006, "message": "API key is invalid."}
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", visit_date()).await;

    assert!(matches!(result, Err(WeatherError::Unauthorized(_))));
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(&mock_server, ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", visit_date()).await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_server_error_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", visit_date()).await;

    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not json at all"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast("Berlin", visit_date()).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_timeout_is_connection_failed() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(sample_forecast_response("Sunny"))
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 1,
    };
    let client = WeatherApiClient::new(config).unwrap();

    let result = client.forecast("Berlin", visit_date()).await;
    assert!(matches!(result, Err(WeatherError::ConnectionFailed(_))));
}
