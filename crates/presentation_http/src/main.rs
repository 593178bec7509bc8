//! TableTalk HTTP Server
//!
//! Main entry point for the booking API and voice frontend.

use std::{sync::Arc, time::Duration};

use application::{BookingService, HealthService, VoiceService, WeatherAdvisor};
use infrastructure::{
    AppConfig, Environment, MlServiceAdapter, SqliteBookingStore, SqliteDatabaseHealth,
    WeatherApiAdapter, create_pool, init_tracing,
};
use presentation_http::{create_app, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.telemetry)?;

    info!("TableTalk v{} starting...", env!("CARGO_PKG_VERSION"));
    for warning in config.warnings() {
        warn!("{warning}");
    }

    let environment = config.environment();
    set_expose_internal_errors(environment != Environment::Production);

    info!(
        %environment,
        address = %config.server.bind_address(),
        database = %config.database.path,
        ml_service = %config.ml_service.base_url,
        capacity_per_hour = config.booking.capacity_per_hour,
        "Configuration loaded"
    );

    // Persistence
    let pool = Arc::new(
        create_pool(&config.database)
            .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?,
    );
    let store = Arc::new(SqliteBookingStore::new(Arc::clone(&pool)));
    let database_health = Arc::new(SqliteDatabaseHealth::new(Arc::clone(&pool)));

    // External collaborators
    let weather = Arc::new(
        WeatherApiAdapter::new(config.weather.to_client_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?,
    );
    let ml_service = Arc::new(
        MlServiceAdapter::new(config.ml_service.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize ML service client: {e}"))?,
    );

    let health = HealthService::new()
        .with_config(config.health.clone())
        .with_database(database_health)
        .with_ml_service(ml_service.clone())
        .with_weather(weather.clone());

    let state = AppState {
        bookings: BookingService::new(store, config.booking.slot_capacity()),
        weather: WeatherAdvisor::new(weather),
        voice: VoiceService::new(ml_service.clone(), ml_service),
        health: Arc::new(health),
    };

    let app = create_app(state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!("Graceful shutdown timed out, exiting");
        std::process::exit(1);
    });
}
