//! Booking service
//!
//! Creation of bookings under the per-hour capacity rule, plus listing,
//! lookup and cancellation.

use std::{fmt, sync::Arc};

use chrono::NaiveDate;
use domain::entities::Booking;
use domain::value_objects::{BookingId, BookingStatus, HourSlot, SeatingPreference, SlotCapacity};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApplicationError, ports::BookingStore};

/// A booking as requested by a client, before it has an identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub customer_name: String,
    pub number_of_guests: u32,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cuisine_preference: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub weather_info: Option<serde_json::Value>,
    #[serde(default)]
    pub seating_preference: Option<SeatingPreference>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

impl NewBooking {
    fn into_booking(self) -> Result<Booking, DomainError> {
        let name = self.customer_name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError(
                "customerName is required".to_string(),
            ));
        }
        if self.number_of_guests == 0 {
            return Err(DomainError::ValidationError(
                "numberOfGuests must be at least 1".to_string(),
            ));
        }
        let Some(date) = self.booking_date else {
            return Err(DomainError::ValidationError(
                "bookingDate is required".to_string(),
            ));
        };
        let time = self.booking_time.trim();
        if time.is_empty() {
            return Err(DomainError::ValidationError(
                "bookingTime is required".to_string(),
            ));
        }

        let mut booking = Booking::new(name, self.number_of_guests, date, time)
            .with_seating_preference(self.seating_preference.unwrap_or_default())
            .with_status(self.status.unwrap_or_default());
        booking.location = non_blank(self.location);
        booking.cuisine_preference = non_blank(self.cuisine_preference);
        booking.special_requests = non_blank(self.special_requests);
        booking.weather_info = self.weather_info;
        Ok(booking)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Seats taken and left in one date/hour slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    /// `None` when the time label names no hour; such bookings are not
    /// capacity-checked
    pub slot: Option<HourSlot>,
    pub booked: u32,
    pub available: u32,
    pub total: u32,
}

/// Service for creating and managing bookings
pub struct BookingService<S: BookingStore> {
    store: Arc<S>,
    capacity: SlotCapacity,
    /// Serializes the capacity check with the insert that follows it
    admission: Arc<Mutex<()>>,
}

impl<S: BookingStore> fmt::Debug for BookingService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingService")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<S: BookingStore> Clone for BookingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            capacity: self.capacity,
            admission: Arc::clone(&self.admission),
        }
    }
}

impl<S: BookingStore> BookingService<S> {
    /// Create a new booking service
    #[must_use]
    pub fn new(store: Arc<S>, capacity: SlotCapacity) -> Self {
        Self {
            store,
            capacity,
            admission: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> SlotCapacity {
        self.capacity
    }

    /// Create a booking if its hour slot still has room
    ///
    /// Guests of non-cancelled bookings on the same date and in the same
    /// hour slot are summed; the new party must fit under the ceiling.
    /// Bookings whose time names no hour skip the check.
    #[instrument(skip(self, request), fields(guests = request.number_of_guests, time = %request.booking_time))]
    pub async fn create(&self, request: NewBooking) -> Result<Booking, ApplicationError> {
        let booking = request.into_booking()?;

        let _admitted = self.admission.lock().await;

        if let Some(slot) = booking.hour_slot() {
            let booked = self.booked_guests(booking.booking_date, slot).await?;
            if let Err(exceeded) =
                self.capacity
                    .check(&booking.booking_time, booked, booking.number_of_guests)
            {
                warn!(
                    %slot,
                    booked,
                    requested = booking.number_of_guests,
                    "Hour slot is full"
                );
                return Err(exceeded.into());
            }
        } else {
            debug!(time = %booking.booking_time, "No hour in booking time, skipping capacity check");
        }

        self.store.save(&booking).await?;
        info!(id = %booking.booking_id, "Booking created");
        Ok(booking)
    }

    /// All bookings, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Booking>, ApplicationError> {
        self.store.list_recent(limit).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &BookingId) -> Result<Booking, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound("Booking not found".to_string()))
    }

    /// Mark a booking cancelled, releasing its seats
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &BookingId) -> Result<Booking, ApplicationError> {
        let _admitted = self.admission.lock().await;

        let mut booking = self.get(id).await?;
        if booking.status == BookingStatus::Cancelled {
            debug!(%id, "Booking already cancelled");
            return Ok(booking);
        }
        booking.cancel();
        self.store.update(&booking).await?;
        info!(%id, "Booking cancelled");
        Ok(booking)
    }

    /// Seats taken and left for a date and time label
    #[instrument(skip(self))]
    pub async fn slot_availability(
        &self,
        date: NaiveDate,
        time: &str,
    ) -> Result<SlotAvailability, ApplicationError> {
        let total = self.capacity.total();
        let Some(slot) = HourSlot::from_label(time) else {
            return Ok(SlotAvailability {
                slot: None,
                booked: 0,
                available: total,
                total,
            });
        };
        let booked = self.booked_guests(date, slot).await?;
        Ok(SlotAvailability {
            slot: Some(slot),
            booked,
            available: self.capacity.available(booked),
            total,
        })
    }

    async fn booked_guests(&self, date: NaiveDate, slot: HourSlot) -> Result<u32, ApplicationError> {
        let same_day = self.store.list_for_date(date).await?;
        Ok(same_day
            .iter()
            .filter(|b| b.counts_toward_capacity() && b.hour_slot() == Some(slot))
            .map(|b| b.number_of_guests)
            .fold(0, u32::saturating_add))
    }
}
