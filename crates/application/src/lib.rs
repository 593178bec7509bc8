//! Application layer - Use cases and orchestration
//!
//! Contains the booking use cases, the voice booking dialogue and the port
//! definitions. Orchestrates domain objects and infrastructure adapters.

pub mod booking_dialogue;
pub mod date_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use booking_dialogue::{BookingDialogue, DialogueAction, DialogueReply};
pub use date_parser::parse_spoken_date;
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
