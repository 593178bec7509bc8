//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::{
    BookingService, HealthService, VoiceService, WeatherAdvisor,
    error::ApplicationError,
    ports::{
        AudioUpload, ForecastReport, MlServiceHealth, RequestValidationPort, RequestVerdict,
        Transcript, TranscriptionPort, WeatherPort,
    },
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use chrono::NaiveDate;
use domain::value_objects::SlotCapacity;
use infrastructure::{
    DatabaseConfig, ServerConfig, SqliteBookingStore, SqliteDatabaseHealth, create_pool,
};
use presentation_http::{REQUEST_ID_HEADER, create_app, state::AppState};
use serde_json::{Value, json};

// ============================================================================
// Fakes
// ============================================================================

/// ML service stand-in; `None` makes every call fail
struct FakeMlService {
    transcript: Option<&'static str>,
    verdict: Option<RequestVerdict>,
}

impl FakeMlService {
    fn online() -> Self {
        Self {
            transcript: Some("table for two"),
            verdict: Some(RequestVerdict::accepted("We can arrange that")),
        }
    }

    fn offline() -> Self {
        Self {
            transcript: None,
            verdict: None,
        }
    }
}

#[async_trait]
impl TranscriptionPort for FakeMlService {
    async fn transcribe(&self, audio: AudioUpload) -> Result<Transcript, ApplicationError> {
        let text = self
            .transcript
            .ok_or_else(|| ApplicationError::ExternalService("connect ECONNREFUSED".into()))?;
        Ok(Transcript {
            success: true,
            text: format!("{text} ({} bytes)", audio.data.len()),
            language: Some("en".into()),
            language_probability: Some(0.99),
        })
    }

    async fn health(&self) -> Result<MlServiceHealth, ApplicationError> {
        if self.transcript.is_none() {
            return Err(ApplicationError::ExternalService("offline".into()));
        }
        Ok(MlServiceHealth {
            status: "online".into(),
            ollama: Some("connected".into()),
            model: Some("llama3.2".into()),
        })
    }
}

#[async_trait]
impl RequestValidationPort for FakeMlService {
    async fn validate(&self, _text: &str) -> Result<RequestVerdict, ApplicationError> {
        self.verdict
            .clone()
            .ok_or_else(|| ApplicationError::ExternalService("timeout".into()))
    }
}

/// Weather stand-in returning a fixed condition
struct FakeWeather {
    configured: bool,
    condition: &'static str,
}

#[async_trait]
impl WeatherPort for FakeWeather {
    async fn get_forecast(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<ForecastReport, ApplicationError> {
        Ok(ForecastReport {
            raw: json!({"location": {"name": location}, "date": date.to_string()}),
            condition_text: Some(self.condition.to_string()),
        })
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

struct Harness {
    ml: FakeMlService,
    weather: FakeWeather,
    capacity: u32,
    server_config: ServerConfig,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            ml: FakeMlService::online(),
            weather: FakeWeather {
                configured: true,
                condition: "Sunny",
            },
            capacity: 30,
            server_config: ServerConfig::default(),
        }
    }
}

impl Harness {
    fn server(self) -> TestServer {
        let pool = Arc::new(create_pool(&DatabaseConfig::in_memory()).expect("pool"));
        let store = Arc::new(SqliteBookingStore::new(Arc::clone(&pool)));
        let ml = Arc::new(self.ml);
        let weather = Arc::new(self.weather);

        let health = HealthService::new()
            .with_database(Arc::new(SqliteDatabaseHealth::new(pool)))
            .with_ml_service(ml.clone())
            .with_weather(weather.clone());

        let state = AppState {
            bookings: BookingService::new(store, SlotCapacity::new(self.capacity)),
            weather: WeatherAdvisor::new(weather),
            voice: VoiceService::new(ml.clone(), ml),
            health: Arc::new(health),
        };

        TestServer::new(create_app(state, &self.server_config)).expect("test server")
    }
}

fn booking_body(name: &str, guests: u32, time: &str) -> Value {
    json!({
        "customerName": name,
        "numberOfGuests": guests,
        "bookingDate": "2026-12-05",
        "bookingTime": time,
        "location": "Berlin",
        "cuisinePreference": "Italian"
    })
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn create_booking_returns_201_with_defaults() {
    let server = Harness::default().server();

    let response = server
        .post("/api/bookings")
        .json(&booking_body("Ada Lovelace", 4, "7 pm"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["customerName"], "Ada Lovelace");
    assert_eq!(body["numberOfGuests"], 4);
    assert_eq!(body["bookingDate"], "2026-12-05");
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["seatingPreference"], "unspecified");
    assert!(body["bookingId"].as_str().is_some());
}

#[tokio::test]
async fn capacity_exceeded_returns_structured_400() {
    let server = Harness::default().server();

    server
        .post("/api/bookings")
        .json(&booking_body("Ada", 28, "7 pm"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/bookings")
        .json(&booking_body("Grace", 5, "7:30 pm"))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "CAPACITY_EXCEEDED");
    assert_eq!(body["availableCapacity"], 2);
    assert_eq!(body["requestedGuests"], 5);
    assert_eq!(body["totalCapacity"], 30);
    assert_eq!(
        body["message"],
        "Sorry, we can only accommodate 2 more guests at 7:30 pm. \
         Please choose a different time or reduce the number of guests."
    );
}

#[tokio::test]
async fn morning_and_evening_hours_are_separate_slots() {
    let server = Harness {
        capacity: 4,
        ..Harness::default()
    }
    .server();

    server
        .post("/api/bookings")
        .json(&booking_body("Ada", 4, "7 pm"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/bookings")
        .json(&booking_body("Grace", 4, "7 am"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn invalid_booking_is_rejected() {
    let server = Harness::default().server();

    server
        .post("/api/bookings")
        .json(&booking_body("Ada", 0, "7 pm"))
        .await
        .assert_status_bad_request();

    let response = server
        .post("/api/bookings")
        .json(&json!({"numberOfGuests": "four"}))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn list_is_newest_first() {
    let server = Harness::default().server();
    for name in ["First", "Second"] {
        server
            .post("/api/bookings")
            .json(&booking_body(name, 2, "6 pm"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server.get("/api/bookings").await.json();
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["customerName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);

    let limited: Value = server.get("/api/bookings?limit=1").await.json();
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_and_cancel_booking() {
    let server = Harness::default().server();
    let created: Value = server
        .post("/api/bookings")
        .json(&booking_body("Ada", 2, "8 pm"))
        .await
        .json();
    let id = created["bookingId"].as_str().unwrap();

    let fetched: Value = server.get(&format!("/api/bookings/{id}")).await.json();
    assert_eq!(fetched["customerName"], "Ada");

    let response = server.delete(&format!("/api/bookings/{id}")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Booking cancelled");
    assert_eq!(body["booking"]["status"], "cancelled");

    let fetched: Value = server.get(&format!("/api/bookings/{id}")).await.json();
    assert_eq!(fetched["status"], "cancelled");
}

#[tokio::test]
async fn unknown_booking_is_404() {
    let server = Harness::default().server();

    for path in [
        "/api/bookings/0191d3f0-0000-7000-8000-000000000000",
        "/api/bookings/not-a-uuid",
    ] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        response.assert_json(&json!({"error": "Booking not found"}));
    }

    server
        .delete("/api/bookings/0191d3f0-0000-7000-8000-000000000000")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn availability_reports_remaining_seats() {
    let server = Harness::default().server();
    server
        .post("/api/bookings")
        .json(&booking_body("Ada", 12, "7 pm"))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = server
        .get("/api/availability?date=2026-12-05&time=7:15%20pm")
        .await
        .json();
    assert_eq!(body["booked"], 12);
    assert_eq!(body["available"], 18);
    assert_eq!(body["total"], 30);
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn weather_returns_condition_and_suggestion() {
    let server = Harness::default().server();

    let response = server
        .get("/api/weather")
        .add_query_param("date", "2026-12-05")
        .add_query_param("location", "Berlin")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["condition"], "sunny");
    assert_eq!(
        body["suggestion"],
        "The weather looks great! Outdoor seating would be a lovely choice."
    );
    assert_eq!(body["raw"]["location"]["name"], "Berlin");
}

#[tokio::test]
async fn weather_requires_date_and_location() {
    let server = Harness::default().server();

    let response = server.get("/api/weather?location=Berlin").await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "date and location are required"}));
}

#[tokio::test]
async fn weather_without_api_key_is_500() {
    let server = Harness {
        weather: FakeWeather {
            configured: false,
            condition: "Sunny",
        },
        ..Harness::default()
    }
    .server();

    let response = server
        .get("/api/weather?date=2026-12-05&location=Berlin")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "Weather API key not configured"}));
}

// ============================================================================
// ML service proxies
// ============================================================================

#[tokio::test]
async fn transcribe_forwards_audio() {
    let server = Harness::default().server();
    let form = MultipartForm::new().add_part(
        "audio",
        Part::bytes(vec![1_u8, 2, 3, 4])
            .file_name("clip.webm")
            .mime_type("audio/webm"),
    );

    let response = server.post("/api/transcribe").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "table for two (4 bytes)");
}

#[tokio::test]
async fn transcribe_without_audio_is_400() {
    let server = Harness::default().server();
    let form = MultipartForm::new().add_text("note", "no file here");

    let response = server.post("/api/transcribe").multipart(form).await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "No audio file provided"}));
}

#[tokio::test]
async fn transcribe_failure_reports_details() {
    let server = Harness {
        ml: FakeMlService::offline(),
        ..Harness::default()
    }
    .server();
    let form = MultipartForm::new().add_part("audio", Part::bytes(vec![9_u8; 16]));

    let response = server.post("/api/transcribe").multipart(form).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Transcription failed",
        "details": "connect ECONNREFUSED"
    }));
}

#[tokio::test]
async fn validate_request_proxies_verdict() {
    let server = Harness::default().server();

    let response = server
        .post("/api/ml/validate_request")
        .json(&json!({"text": "birthday cake at dessert"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"valid": true, "reason": "We can arrange that"}));
}

#[tokio::test]
async fn validate_request_falls_back_when_service_is_down() {
    let server = Harness {
        ml: FakeMlService::offline(),
        ..Harness::default()
    }
    .server();

    let response = server
        .post("/api/ml/validate_request")
        .json(&json!({"text": "a table near the piano"}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"valid": true, "reason": "Validation service unavailable"}));
}

// ============================================================================
// Health, middleware and static files
// ============================================================================

#[tokio::test]
async fn health_and_ready() {
    let server = Harness::default().server();

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["status"], "ok");

    let response = server.get("/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["services"]["database"]["healthy"], true);
    let db_info = body["services"]["database"]["info"].as_str().unwrap();
    assert!(db_info.starts_with("SQLite "));
    assert!(db_info.ends_with("schema v2, 0 bookings"));
    assert_eq!(body["services"]["ml_service"]["info"], "llama3.2");
}

#[tokio::test]
async fn ready_ignores_ml_outage() {
    let server = Harness {
        ml: FakeMlService::offline(),
        ..Harness::default()
    }
    .server();

    let response = server.get("/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["services"]["ml_service"]["healthy"], false);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let server = Harness::default().server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("kiosk-7"),
        )
        .await;
    assert_eq!(response.header(REQUEST_ID_HEADER), "kiosk-7");

    let response = server.get("/health").await;
    assert!(!response.header(REQUEST_ID_HEADER).is_empty());
}

#[tokio::test]
async fn unknown_paths_serve_the_frontend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>TableTalk</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();

    let server = Harness {
        server_config: ServerConfig {
            static_dir: dir.path().to_string_lossy().into_owned(),
            ..ServerConfig::default()
        },
        ..Harness::default()
    }
    .server();

    server.get("/app.js").await.assert_text("console.log('hi')");
    server.get("/bookings/today").await.assert_text("<h1>TableTalk</h1>");
}
