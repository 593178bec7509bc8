//! Route definitions

use std::path::Path;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the API router with all routes
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Bookings
        .route(
            "/api/bookings",
            post(handlers::bookings::create_booking).get(handlers::bookings::list_bookings),
        )
        .route(
            "/api/bookings/{id}",
            get(handlers::bookings::get_booking).delete(handlers::bookings::cancel_booking),
        )
        .route("/api/availability", get(handlers::bookings::availability))
        // Weather
        .route("/api/weather", get(handlers::weather::get_weather))
        // ML service proxies
        .route(
            "/api/transcribe",
            post(handlers::voice::transcribe)
                .layer(DefaultBodyLimit::max(config.max_body_size_audio_bytes)),
        )
        .route(
            "/api/ml/validate_request",
            post(handlers::voice::validate_request),
        )
        .layer(DefaultBodyLimit::max(config.max_body_size_json_bytes))
        .with_state(state)
}

/// The full application: API routes, static frontend and middleware
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let app = create_router(state, config).fallback_service(static_files(&config.static_dir));

    // Layers added last run first
    let app = app.layer(TraceLayer::new_for_http());
    let app = if config.cors_enabled {
        app.layer(cors_layer(&config.allowed_origins))
    } else {
        app
    };
    app.layer(RequestIdLayer::new())
}

/// Serve the frontend, answering unknown paths with `index.html`
fn static_files(dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(dir).join("index.html");
    ServeDir::new(dir).fallback(ServeFile::new(index))
}

/// Allow any origin when none are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| {
            o.parse()
                .inspect_err(|_| warn!(origin = %o, "Ignoring unparsable CORS origin"))
                .ok()
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
