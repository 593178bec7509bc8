//! Speech port - Interface to the ML service for transcription and
//! special-request validation

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Recorded audio as uploaded by a client
#[derive(Debug, Clone, Default)]
pub struct AudioUpload {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// Client-side file name, if any
    pub file_name: Option<String>,
    /// MIME type declared by the client, e.g. "audio/webm"
    pub content_type: Option<String>,
}

impl AudioUpload {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Result of a transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub success: bool,
    /// Transcribed text
    pub text: String,
    /// Detected language code (e.g., "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Confidence of the language detection (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_probability: Option<f64>,
}

/// Whether a special request can be honoured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestVerdict {
    pub valid: bool,
    pub reason: String,
}

impl RequestVerdict {
    #[must_use]
    pub fn accepted(reason: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }
}

/// Health information reported by the ML service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlServiceHealth {
    pub status: String,
    /// Reachability of the language model backend as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl MlServiceHealth {
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online")
    }
}

/// Port for speech-to-text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe recorded audio to text
    async fn transcribe(&self, audio: AudioUpload) -> Result<Transcript, ApplicationError>;

    /// Query the health of the ML service behind this port
    async fn health(&self) -> Result<MlServiceHealth, ApplicationError>;
}

/// Port for judging whether a special request is something the
/// restaurant can accommodate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestValidationPort: Send + Sync {
    async fn validate(&self, text: &str) -> Result<RequestVerdict, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn TranscriptionPort, _: &dyn RequestValidationPort) {}

    #[test]
    fn traits_are_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TranscriptionPort>();
        assert_send_sync::<dyn RequestValidationPort>();
    }

    #[test]
    fn audio_upload_builder() {
        let upload = AudioUpload::new(vec![1, 2, 3])
            .with_file_name("clip.webm")
            .with_content_type("audio/webm");
        assert_eq!(upload.data.len(), 3);
        assert_eq!(upload.file_name.as_deref(), Some("clip.webm"));
        assert_eq!(upload.content_type.as_deref(), Some("audio/webm"));
    }

    #[test]
    fn verdict_constructors() {
        assert!(RequestVerdict::accepted("fine").valid);
        assert!(!RequestVerdict::rejected("no pets").valid);
    }

    #[test]
    fn health_status_is_case_insensitive() {
        let health = MlServiceHealth {
            status: "Online".into(),
            ollama: None,
            model: None,
        };
        assert!(health.is_online());
    }

    #[test]
    fn transcript_deserializes_service_payload() {
        let json = r#"{"success":true,"text":"table for two","language":"en","language_probability":0.98}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert!(transcript.success);
        assert_eq!(transcript.text, "table for two");
        assert_eq!(transcript.language.as_deref(), Some("en"));
    }
}
