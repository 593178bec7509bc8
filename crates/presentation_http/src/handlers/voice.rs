//! Endpoints proxied to the ML service

use application::ports::{AudioUpload, RequestVerdict, Transcript};
use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio";

/// Body of a special-request validation call
#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub text: String,
}

/// Transcribe an uploaded recording
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Transcript>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let mut audio = AudioUpload::new(data.to_vec());
        audio.file_name = file_name;
        audio.content_type = content_type;
        upload = Some(audio);
        break;
    }

    let upload = upload
        .filter(|u| !u.data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;
    debug!(bytes = upload.data.len(), content_type = ?upload.content_type, "Received audio");

    let transcript = state
        .voice
        .transcribe(upload)
        .await
        .map_err(|e| ApiError::from_application(e, "Transcription failed"))?;
    Ok(Json(transcript))
}

/// Ask whether a special request can be accommodated
///
/// Never fails: when the ML service cannot answer, the request is accepted.
#[instrument(skip(state, payload))]
pub async fn validate_request(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Json<RequestVerdict> {
    let request = payload.map(|Json(r)| r).unwrap_or_else(|e| {
        warn!(error = %e, "Unreadable validation request, treating as empty");
        ValidateRequest::default()
    });

    Json(state.voice.validate_special_request(&request.text).await)
}
