//! ML service adapter - Implements the speech ports using ai_speech

use std::sync::Arc;

use ai_speech::{
    AudioData, MlServiceConfig, MlServiceProvider, RequestValidator, SpeechError, SpeechToText,
};
use application::error::ApplicationError;
use application::ports::{
    AudioUpload, MlServiceHealth, RequestValidationPort, RequestVerdict, Transcript,
    TranscriptionPort,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for the Python ML service (transcription and request validation)
#[derive(Clone)]
pub struct MlServiceAdapter {
    provider: Arc<MlServiceProvider>,
}

impl std::fmt::Debug for MlServiceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlServiceAdapter")
            .field("base_url", &self.provider.config().base_url)
            .finish()
    }
}

impl MlServiceAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: MlServiceConfig) -> Result<Self, ApplicationError> {
        let provider = MlServiceProvider::new(config).map_err(Self::map_error)?;
        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::InvalidAudio(e) => {
                ApplicationError::InvalidOperation(format!("Invalid audio: {e}"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    fn to_audio_data(upload: AudioUpload) -> AudioData {
        let mut audio = AudioData::new(upload.data);
        if let Some(name) = upload.file_name {
            audio = audio.with_file_name(name);
        }
        if let Some(content_type) = upload.content_type {
            audio = audio.with_content_type(content_type);
        }
        audio
    }
}

#[async_trait]
impl TranscriptionPort for MlServiceAdapter {
    #[instrument(skip(self, audio), fields(audio_bytes = audio.data.len()))]
    async fn transcribe(&self, audio: AudioUpload) -> Result<Transcript, ApplicationError> {
        let transcription = self
            .provider
            .transcribe(Self::to_audio_data(audio))
            .await
            .map_err(Self::map_error)?;

        debug!(chars = transcription.text.len(), language = ?transcription.language, "Transcribed audio");

        Ok(Transcript {
            success: transcription.success,
            text: transcription.text,
            language: transcription.language,
            language_probability: transcription.language_probability,
        })
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<MlServiceHealth, ApplicationError> {
        let health = self.provider.health().await.map_err(Self::map_error)?;
        Ok(MlServiceHealth {
            status: health.status,
            ollama: health.ollama,
            model: health.model,
        })
    }
}

#[async_trait]
impl RequestValidationPort for MlServiceAdapter {
    #[instrument(skip(self, text))]
    async fn validate(&self, text: &str) -> Result<RequestVerdict, ApplicationError> {
        let verdict = self
            .provider
            .validate_request(text)
            .await
            .map_err(Self::map_error)?;

        Ok(RequestVerdict {
            valid: verdict.valid,
            reason: verdict.reason,
        })
    }
}
