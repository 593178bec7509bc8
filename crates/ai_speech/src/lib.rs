//! AI Speech - client for the TableTalk ML service
//!
//! Provides traits and an HTTP implementation for the voice features:
//! - `SpeechToText` - Transcribe recorded audio to text
//! - `RequestValidator` - Screen free-text special requests
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioData, MlServiceConfig, MlServiceProvider, SpeechToText};
//!
//! let provider = MlServiceProvider::new(MlServiceConfig::default())?;
//! let audio = AudioData::new(bytes).with_content_type("audio/webm");
//! let transcription = provider.transcribe(audio).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::MlServiceConfig;
pub use error::SpeechError;
pub use ports::{RequestValidator, SpeechToText};
pub use providers::MlServiceProvider;
pub use types::{
    AudioData, AudioFormat, DEFAULT_UPLOAD_NAME, RequestValidation, ServiceHealth, Transcription,
};
