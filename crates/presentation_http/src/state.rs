//! Application state shared across handlers

use std::sync::Arc;

use application::{BookingService, HealthService, VoiceService, WeatherAdvisor};
use infrastructure::SqliteBookingStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Capacity-checked booking use cases
    pub bookings: BookingService<SqliteBookingStore>,
    /// Forecast lookup and seating advice
    pub weather: WeatherAdvisor,
    /// Transcription and special-request screening
    pub voice: VoiceService,
    /// Readiness aggregation
    pub health: Arc<HealthService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bookings", &self.bookings)
            .field("weather", &self.weather)
            .finish_non_exhaustive()
    }
}
