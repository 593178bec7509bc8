//! Port definitions for the ML service
//!
//! Defines the traits (ports) that ML service adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, RequestValidation, ServiceHealth, Transcription};

/// Port for Speech-to-Text (STT) implementations
///
/// # Example
///
/// ```ignore
/// use ai_speech::{AudioData, SpeechToText};
///
/// async fn transcribe_clip(stt: &impl SpeechToText, bytes: Vec<u8>) -> Result<String, SpeechError> {
///     let audio = AudioData::new(bytes).with_content_type("audio/webm");
///     Ok(stt.transcribe(audio).await?.text)
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the audio is empty or the service fails.
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Report the health of the service
    async fn health(&self) -> Result<ServiceHealth, SpeechError>;

    /// Check if the STT service is available
    async fn is_available(&self) -> bool {
        self.health().await.is_ok_and(|h| h.status == "online")
    }
}

/// Port for special-request validation
#[async_trait]
pub trait RequestValidator: Send + Sync {
    /// Ask whether a free-text special request is something the
    /// restaurant can accommodate
    async fn validate_request(&self, text: &str) -> Result<RequestValidation, SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    #[async_trait]
    impl SpeechToText for Offline {
        async fn transcribe(&self, _audio: AudioData) -> Result<Transcription, SpeechError> {
            Err(SpeechError::ConnectionFailed("offline".into()))
        }

        async fn health(&self) -> Result<ServiceHealth, SpeechError> {
            Err(SpeechError::ConnectionFailed("offline".into()))
        }
    }

    #[test]
    fn traits_are_object_safe() {
        fn _stt(_: &dyn SpeechToText) {}
        fn _validator(_: &dyn RequestValidator) {}
    }

    #[tokio::test]
    async fn unreachable_service_is_not_available() {
        assert!(!Offline.is_available().await);
    }
}
