//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod ml_service_adapter;
mod weather_adapter;

pub use ml_service_adapter::MlServiceAdapter;
pub use weather_adapter::WeatherApiAdapter;
