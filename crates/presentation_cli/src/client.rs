//! HTTP client for the TableTalk REST API

use std::path::Path;

use anyhow::{Context, bail};
use application::{NewBooking, RequestVerdict, SlotAvailability, Transcript, WeatherAdvice};
use chrono::NaiveDate;
use domain::entities::Booking;
use reqwest::{StatusCode, multipart};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
    /// Only present on capacity rejections
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn describe(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {details}", self.error),
            None => self.error.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CancelBody {
    booking: Booking,
}

/// What happened to a booking request
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed(Box<Booking>),
    /// The hour slot is full; carries the server's message
    CapacityExceeded(String),
}

/// Thin wrapper over `reqwest` for the endpoints the CLI uses
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Format endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// Turn a non-success response into an error carrying the server message
    async fn check(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => bail!("HTTP {status}: {}", body.describe()),
            Err(_) => bail!("HTTP {status}: {text}"),
        }
    }

    /// Create a booking; a full slot is an outcome, not an error
    #[instrument(skip(self, booking), fields(guests = booking.number_of_guests))]
    pub async fn create_booking(&self, booking: &NewBooking) -> anyhow::Result<BookingOutcome> {
        let response = self
            .http
            .post(self.url("/api/bookings"))
            .json(booking)
            .send()
            .await
            .context("Failed to reach the booking server")?;

        if response.status() == StatusCode::BAD_REQUEST {
            let text = response.text().await.unwrap_or_default();
            let body: ErrorBody = serde_json::from_str(&text)
                .with_context(|| format!("HTTP 400: {text}"))?;
            if body.error == "CAPACITY_EXCEEDED" {
                let message = body.message.unwrap_or_else(|| body.error.clone());
                debug!(%message, "Slot is full");
                return Ok(BookingOutcome::CapacityExceeded(message));
            }
            bail!("HTTP 400 Bad Request: {}", body.describe());
        }

        let booking = Self::check(response).await?.json::<Booking>().await?;
        Ok(BookingOutcome::Confirmed(Box::new(booking)))
    }

    #[instrument(skip(self))]
    pub async fn list_bookings(&self, limit: Option<u32>) -> anyhow::Result<Vec<Booking>> {
        let mut request = self.http.get(self.url("/api/bookings"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: &str) -> anyhow::Result<Booking> {
        let response = self
            .http
            .get(self.url(&format!("/api/bookings/{id}")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, id: &str) -> anyhow::Result<Booking> {
        let response = self
            .http
            .delete(self.url(&format!("/api/bookings/{id}")))
            .send()
            .await?;
        let body: CancelBody = Self::check(response).await?.json().await?;
        Ok(body.booking)
    }

    #[instrument(skip(self))]
    pub async fn availability(&self, date: NaiveDate, time: &str) -> anyhow::Result<SlotAvailability> {
        let date = date.format("%Y-%m-%d").to_string();
        let response = self
            .http
            .get(self.url("/api/availability"))
            .query(&[("date", date.as_str()), ("time", time)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    pub async fn weather(&self, date: NaiveDate, location: &str) -> anyhow::Result<WeatherAdvice> {
        let date = date.format("%Y-%m-%d").to_string();
        let response = self
            .http
            .get(self.url("/api/weather"))
            .query(&[("date", date.as_str()), ("location", location)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Upload an audio file for transcription
    #[instrument(skip(self))]
    pub async fn transcribe(&self, path: &Path) -> anyhow::Result<Transcript> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "audio.webm".to_string(), |n| n.to_string_lossy().into_owned());
        let mime = audio_mime(path);

        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)?;
        let form = multipart::Form::new().part("audio", part);

        let response = self
            .http
            .post(self.url("/api/transcribe"))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Ask whether a special request can be honoured
    #[instrument(skip(self))]
    pub async fn validate_request(&self, text: &str) -> anyhow::Result<RequestVerdict> {
        let response = self
            .http
            .post(self.url("/api/ml/validate_request"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Readiness report; the status code is returned alongside the body
    #[instrument(skip(self))]
    pub async fn ready(&self) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let response = self.http.get(self.url("/ready")).send().await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }
}

/// MIME type guessed from the file extension
fn audio_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "audio/webm",
    }
}
