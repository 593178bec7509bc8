//! HTTP request handlers

pub mod bookings;
pub mod health;
pub mod voice;
pub mod weather;
