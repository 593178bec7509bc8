//! Booking endpoints

use application::{NewBooking, SlotAvailability};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::NaiveDate;
use domain::{entities::Booking, value_objects::BookingId};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

/// Query parameters for listing bookings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Return at most this many, newest first
    pub limit: Option<u32>,
}

/// Query parameters for a slot availability lookup
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time: String,
}

/// Response after cancelling a booking
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub message: &'static str,
    pub booking: Booking,
}

fn parse_id(id: &str) -> Result<BookingId, ApiError> {
    // An id that cannot exist is reported the same way as a missing one
    BookingId::parse(id).map_err(|_| ApiError::NotFound("Booking not found".to_string()))
}

/// Create a booking if its hour slot has room
#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let booking = state
        .bookings
        .create(request)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to create booking"))?;

    info!(id = %booking.booking_id, guests = booking.number_of_guests, "Booking accepted");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings, newest first
#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state
        .bookings
        .list(query.limit)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to fetch bookings"))?;
    Ok(Json(bookings))
}

#[instrument(skip(state))]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let id = parse_id(&id)?;
    let booking = state
        .bookings
        .get(&id)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to fetch booking"))?;
    Ok(Json(booking))
}

/// Soft-cancel a booking; the record is kept with status `cancelled`
#[instrument(skip(state))]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CancelResponse>, ApiError> {
    let id = parse_id(&id)?;
    let booking = state
        .bookings
        .cancel(&id)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to cancel booking"))?;

    Ok(Json(CancelResponse {
        message: "Booking cancelled",
        booking,
    }))
}

/// Seats left in the hour slot of a date and time
#[instrument(skip(state))]
pub async fn availability(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<SlotAvailability>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let availability = state
        .bookings
        .slot_availability(query.date, &query.time)
        .await
        .map_err(|e| ApiError::from_application(e, "Failed to check availability"))?;
    Ok(Json(availability))
}
