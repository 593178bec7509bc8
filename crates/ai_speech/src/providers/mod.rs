//! ML service provider implementations
//!
//! Contains concrete implementations of the `SpeechToText` and `RequestValidator` traits.

pub mod ml_service;

pub use ml_service::MlServiceProvider;
