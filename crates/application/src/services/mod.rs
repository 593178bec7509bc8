//! Application services - Use case implementations

mod booking_service;
mod health_service;
mod voice_service;
mod weather_advisor;

pub use booking_service::{BookingService, NewBooking, SlotAvailability};
pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use voice_service::VoiceService;
pub use weather_advisor::{WeatherAdvice, WeatherAdvisor};
