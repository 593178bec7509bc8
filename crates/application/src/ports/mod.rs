//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod booking_store;
mod database_health_port;
mod speech_port;
mod weather_port;

pub use booking_store::BookingStore;
#[cfg(test)]
pub use booking_store::MockBookingStore;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
#[cfg(test)]
pub use speech_port::{MockRequestValidationPort, MockTranscriptionPort};
pub use speech_port::{
    AudioUpload, MlServiceHealth, RequestValidationPort, RequestVerdict, Transcript,
    TranscriptionPort,
};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{ForecastReport, WeatherPort};
