//! Domain entities - Objects with identity and lifecycle

mod booking;
mod booking_draft;

pub use booking::Booking;
pub use booking_draft::BookingDraft;
