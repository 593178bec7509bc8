//! Types for ML service requests and responses
//!
//! Audio uploads, transcriptions, request verdicts and service health.

use serde::{Deserialize, Serialize};

/// File name used when a client uploads audio without one
pub const DEFAULT_UPLOAD_NAME: &str = "audio.webm";

/// Audio containers produced by browsers and common recorders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WebM container (MediaRecorder default in Chromium and Firefox)
    Webm,
    /// MP4/M4A container (MediaRecorder default in Safari)
    Mp4,
    /// WAV format (uncompressed)
    Wav,
    /// MP3 format
    Mp3,
    /// OGG container
    Ogg,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
        }
    }

    /// Parse audio format from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Handle compound MIME types like "audio/webm;codecs=opus"
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime.to_ascii_lowercase().as_str() {
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" | "video/mp4" => Some(Self::Mp4),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" | "audio/opus" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Parse audio format from a file name's extension
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "webm" => Some(Self::Webm),
            "mp4" | "m4a" => Some(Self::Mp4),
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Infer the format from a MIME type, falling back to the file name
    #[must_use]
    pub fn detect(mime: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime_type)
            .or_else(|| file_name.and_then(Self::from_file_name))
    }
}

/// Audio to be forwarded to the transcription endpoint
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            file_name: None,
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into()).filter(|n: &String| !n.is_empty());
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into()).filter(|c: &String| !c.is_empty());
        self
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Format inferred from the declared MIME type or file name
    #[must_use]
    pub fn format(&self) -> Option<AudioFormat> {
        AudioFormat::detect(self.content_type.as_deref(), self.file_name.as_deref())
    }

    /// File name sent in the multipart part
    #[must_use]
    pub fn upload_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_UPLOAD_NAME)
    }

    /// MIME type sent in the multipart part
    ///
    /// The client's declared type is forwarded as-is; without one the
    /// type is derived from the file name, defaulting to WebM.
    #[must_use]
    pub fn upload_mime(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            self.format()
                .unwrap_or(AudioFormat::Webm)
                .mime_type()
                .to_string()
        })
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    #[serde(default = "default_success")]
    pub success: bool,
    /// Transcribed text
    pub text: String,
    /// Detected language (ISO 639-1 code)
    #[serde(default)]
    pub language: Option<String>,
    /// Confidence of the language detection (0.0 - 1.0)
    #[serde(default)]
    pub language_probability: Option<f64>,
}

const fn default_success() -> bool {
    true
}

impl Transcription {
    /// Create a simple transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
            language: None,
            language_probability: None,
        }
    }

    /// Check if transcription is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Verdict on a special request returned by `/validate_request`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestValidation {
    pub valid: bool,
    #[serde(default)]
    pub reason: String,
}

/// Body of `/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub ollama: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}
