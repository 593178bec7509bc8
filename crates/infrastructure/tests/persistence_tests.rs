//! Integration tests for the booking store behind the booking service,
//! using in-memory SQLite databases

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use application::{ApplicationError, BookingService, NewBooking};
use chrono::NaiveDate;
use domain::value_objects::{BookingStatus, SlotCapacity};
use infrastructure::{DatabaseConfig, SqliteBookingStore, create_pool};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_service(capacity: u32) -> BookingService<SqliteBookingStore> {
    let pool = create_pool(&DatabaseConfig::in_memory()).expect("in-memory pool");
    let store = SqliteBookingStore::new(Arc::new(pool));
    BookingService::new(Arc::new(store), SlotCapacity::new(capacity))
}

fn visit_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 6).unwrap()
}

fn request(name: &str, guests: u32, time: &str) -> NewBooking {
    NewBooking {
        customer_name: name.to_string(),
        number_of_guests: guests,
        booking_date: Some(visit_date()),
        booking_time: time.to_string(),
        ..NewBooking::default()
    }
}

// ============================================================================
// Capacity
// ============================================================================

#[tokio::test]
async fn bookings_fill_an_hour_slot_up_to_capacity() {
    let service = create_service(10);

    service.create(request("Ada", 6, "7 pm")).await.unwrap();
    service.create(request("Grace", 4, "7:30 pm")).await.unwrap();

    let err = service.create(request("Alan", 1, "19:45")).await.unwrap_err();
    let exceeded = err.capacity_exceeded().expect("capacity error");
    assert_eq!(exceeded.available, 0);
    assert_eq!(exceeded.requested, 1);
    assert_eq!(exceeded.total, 10);
}

#[tokio::test]
async fn other_hours_and_days_are_independent() {
    let service = create_service(4);

    service.create(request("Ada", 4, "7 pm")).await.unwrap();
    service.create(request("Grace", 4, "8 pm")).await.unwrap();

    let mut next_day = request("Alan", 4, "7 pm");
    next_day.booking_date = visit_date().succ_opt();
    service.create(next_day).await.unwrap();
}

#[tokio::test]
async fn cancelling_releases_seats() {
    let service = create_service(4);

    let booking = service.create(request("Ada", 4, "7 pm")).await.unwrap();
    assert!(service.create(request("Grace", 2, "7 pm")).await.is_err());

    let cancelled = service.cancel(&booking.booking_id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    service.create(request("Grace", 2, "7 pm")).await.unwrap();
    let availability = service
        .slot_availability(visit_date(), "7 pm")
        .await
        .unwrap();
    assert_eq!(availability.booked, 2);
    assert_eq!(availability.available, 2);
}

#[tokio::test]
async fn concurrent_requests_never_overbook() {
    let service = create_service(10);

    let handles: Vec<_> = (0..5)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.create(request(&format!("Party {i}"), 3, "7 pm")).await })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 3);

    let availability = service
        .slot_availability(visit_date(), "7 pm")
        .await
        .unwrap();
    assert_eq!(availability.booked, 9);
}

// ============================================================================
// Lookup
// ============================================================================

#[tokio::test]
async fn created_booking_round_trips_through_sqlite() {
    let service = create_service(30);
    let mut new = request("Ada", 2, "7 pm");
    new.location = Some("Lisbon".to_string());
    new.weather_info = Some(serde_json::json!({"location": {"name": "Lisbon"}}));

    let created = service.create(new).await.unwrap();
    let fetched = service.get(&created.booking_id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(service.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let service = create_service(30);
    let result = service.get(&domain::value_objects::BookingId::new()).await;
    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
}
