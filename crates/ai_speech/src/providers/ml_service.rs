//! HTTP client for the TableTalk ML service
//!
//! The service exposes three endpoints:
//! - `POST /transcribe` (multipart, field `file`) for speech-to-text
//! - `POST /validate_request` (JSON `{text}`) for special-request screening
//! - `GET /health` for liveness of the service and its language model

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::MlServiceConfig;
use crate::error::SpeechError;
use crate::ports::{RequestValidator, SpeechToText};
use crate::types::{AudioData, RequestValidation, ServiceHealth, Transcription};

/// ML service client implementing both STT and request validation
#[derive(Debug, Clone)]
pub struct MlServiceProvider {
    client: Client,
    config: MlServiceConfig,
}

/// FastAPI error envelope
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl MlServiceProvider {
    /// Create a new ML service client
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: MlServiceConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder().build().map_err(|e| {
            SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { client, config })
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &MlServiceConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Check the status and decode the JSON body
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SpeechError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map_or_else(|_| format!("HTTP {status}"), |b| b.detail);

            return Err(if status.is_server_error() {
                SpeechError::ServiceUnavailable(detail)
            } else {
                SpeechError::RequestFailed(detail)
            });
        }

        response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl SpeechToText for MlServiceProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }
        if audio.size_bytes() > self.config.max_audio_bytes {
            return Err(SpeechError::InvalidAudio(format!(
                "Audio is {} bytes, maximum is {}",
                audio.size_bytes(),
                self.config.max_audio_bytes
            )));
        }

        let file_name = audio.upload_name().to_string();
        let mime_type = audio.upload_mime();
        debug!(file_name = %file_name, mime = %mime_type, "Forwarding audio for transcription");

        let file_part = Part::bytes(audio.into_data())
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(|e| SpeechError::InvalidAudio(format!("Invalid MIME type: {e}")))?;
        let form = Form::new().part("file", file_part);

        let timeout_ms = self.config.transcribe_timeout_ms;
        let response = self
            .client
            .post(self.url("transcribe"))
            .multipart(form)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, timeout_ms))?;

        let transcription: Transcription = Self::decode(response).await?;

        debug!(
            text_len = transcription.text.len(),
            language = ?transcription.language,
            "Transcription complete"
        );

        Ok(transcription)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<ServiceHealth, SpeechError> {
        let timeout_ms = self.config.health_timeout_ms;
        let response = self
            .client
            .get(self.url("health"))
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, timeout_ms))?;

        Self::decode(response).await
    }
}

#[async_trait]
impl RequestValidator for MlServiceProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn validate_request(&self, text: &str) -> Result<RequestValidation, SpeechError> {
        let timeout_ms = self.config.validate_timeout_ms;
        let response = self
            .client
            .post(self.url("validate_request"))
            .json(&json!({ "text": text }))
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, timeout_ms))?;

        let verdict: RequestValidation = Self::decode(response).await?;
        if !verdict.valid {
            warn!(reason = %verdict.reason, "Special request rejected");
        }
        Ok(verdict)
    }
}
