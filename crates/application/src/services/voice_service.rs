//! Voice service
//!
//! Speech-to-text and special-request screening through the ML service.
//! Screening never blocks a booking: when the service cannot answer, the
//! request is accepted.

use std::{fmt, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{AudioUpload, MlServiceHealth, RequestValidationPort, RequestVerdict, Transcript, TranscriptionPort},
};

const NOTHING_REQUESTED: &str = "No special request provided";
const DECLINED: &str = "No special requests";
const SERVICE_UNAVAILABLE: &str = "Validation service unavailable";

/// Orchestrates transcription and request validation
#[derive(Clone)]
pub struct VoiceService {
    transcriber: Arc<dyn TranscriptionPort>,
    validator: Arc<dyn RequestValidationPort>,
}

impl fmt::Debug for VoiceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceService").finish_non_exhaustive()
    }
}

impl VoiceService {
    #[must_use]
    pub fn new(
        transcriber: Arc<dyn TranscriptionPort>,
        validator: Arc<dyn RequestValidationPort>,
    ) -> Self {
        Self {
            transcriber,
            validator,
        }
    }

    /// Transcribe an uploaded recording
    #[instrument(skip(self, audio), fields(bytes = audio.data.len()))]
    pub async fn transcribe(&self, audio: AudioUpload) -> Result<Transcript, ApplicationError> {
        if audio.data.is_empty() {
            return Err(ApplicationError::InvalidOperation(
                "No audio file provided".to_string(),
            ));
        }
        let transcript = self.transcriber.transcribe(audio).await?;
        debug!(chars = transcript.text.len(), language = ?transcript.language, "Transcribed audio");
        Ok(transcript)
    }

    /// Judge whether a special request can be accommodated
    ///
    /// Empty and declined requests are answered locally. Any failure of the
    /// ML service yields an accepting verdict.
    #[instrument(skip(self))]
    pub async fn validate_special_request(&self, text: &str) -> RequestVerdict {
        let text = text.trim();
        if text.is_empty() {
            return RequestVerdict::accepted(NOTHING_REQUESTED);
        }
        let lower = text.to_lowercase();
        if ["no special", "no request", "none"]
            .iter()
            .any(|phrase| lower.contains(phrase))
        {
            return RequestVerdict::accepted(DECLINED);
        }

        match self.validator.validate(text).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "Request validation failed, accepting request");
                RequestVerdict::accepted(SERVICE_UNAVAILABLE)
            },
        }
    }

    /// Health of the ML service
    #[instrument(skip(self))]
    pub async fn ml_health(&self) -> Result<MlServiceHealth, ApplicationError> {
        self.transcriber.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockRequestValidationPort, MockTranscriptionPort};

    fn service(
        transcriber: MockTranscriptionPort,
        validator: MockRequestValidationPort,
    ) -> VoiceService {
        VoiceService::new(Arc::new(transcriber), Arc::new(validator))
    }

    #[tokio::test]
    async fn transcribe_forwards_audio() {
        let mut transcriber = MockTranscriptionPort::new();
        transcriber
            .expect_transcribe()
            .withf(|audio| audio.data == vec![1, 2, 3])
            .times(1)
            .returning(|_| {
                Ok(Transcript {
                    success: true,
                    text: "table for two".into(),
                    language: Some("en".into()),
                    language_probability: Some(0.97),
                })
            });

        let voice = service(transcriber, MockRequestValidationPort::new());
        let transcript = voice.transcribe(AudioUpload::new(vec![1, 2, 3])).await.unwrap();
        assert_eq!(transcript.text, "table for two");
    }

    #[tokio::test]
    async fn empty_audio_is_rejected_locally() {
        let mut transcriber = MockTranscriptionPort::new();
        transcriber.expect_transcribe().never();

        let voice = service(transcriber, MockRequestValidationPort::new());
        let err = voice.transcribe(AudioUpload::new(vec![])).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn empty_and_declined_requests_skip_the_service() {
        let mut validator = MockRequestValidationPort::new();
        validator.expect_validate().never();
        let voice = service(MockTranscriptionPort::new(), validator);

        assert_eq!(
            voice.validate_special_request("  ").await,
            RequestVerdict::accepted("No special request provided")
        );
        for text in ["No special requests", "no requests thanks", "None"] {
            assert_eq!(
                voice.validate_special_request(text).await,
                RequestVerdict::accepted("No special requests"),
                "{text}"
            );
        }
    }

    #[tokio::test]
    async fn service_verdict_is_returned() {
        let mut validator = MockRequestValidationPort::new();
        validator
            .expect_validate()
            .withf(|text| text == "Bring my pet tiger")
            .returning(|_| Ok(RequestVerdict::rejected("Animals are not allowed")));
        let voice = service(MockTranscriptionPort::new(), validator);

        let verdict = voice.validate_special_request(" Bring my pet tiger ").await;
        assert!(!verdict.valid);
        assert_eq!(verdict.reason, "Animals are not allowed");
    }

    #[tokio::test]
    async fn service_failure_accepts_request() {
        let mut validator = MockRequestValidationPort::new();
        validator
            .expect_validate()
            .returning(|_| Err(ApplicationError::ExternalService("timeout".into())));
        let voice = service(MockTranscriptionPort::new(), validator);

        assert_eq!(
            voice.validate_special_request("Window seat").await,
            RequestVerdict::accepted("Validation service unavailable")
        );
    }

    #[tokio::test]
    async fn ml_health_comes_from_transcriber() {
        let mut transcriber = MockTranscriptionPort::new();
        transcriber.expect_health().returning(|| {
            Ok(MlServiceHealth {
                status: "online".into(),
                ollama: Some("connected".into()),
                model: Some("llama3".into()),
            })
        });
        let voice = service(transcriber, MockRequestValidationPort::new());
        assert!(voice.ml_health().await.unwrap().is_online());
    }
}
