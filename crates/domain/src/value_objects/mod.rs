//! Value Objects - Immutable, identity-less domain primitives

mod booking_id;
mod booking_status;
mod cuisine;
mod dialogue_step;
mod hour_slot;
mod seating_preference;
mod slot_capacity;
mod weather_category;

pub use booking_id::BookingId;
pub use booking_status::BookingStatus;
pub use cuisine::Cuisine;
pub use dialogue_step::DialogueStep;
pub use hour_slot::HourSlot;
pub use seating_preference::SeatingPreference;
pub use slot_capacity::{CapacityExceeded, DEFAULT_GUESTS_PER_HOUR, SlotCapacity};
pub use weather_category::WeatherCategory;
