//! WeatherAPI.com integration
//!
//! Client for the WeatherAPI.com forecast endpoint (<https://www.weatherapi.com>).
//! Fetches the forecast for a location on a given day and exposes the
//! day's condition text alongside the untouched provider payload.

pub mod client;
mod models;

pub use client::{WeatherApiClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{DayCondition, Forecast};
