//! TableTalk console client
//!
//! API client and the voice/text booking conversation used by the
//! `tabletalk-cli` binary.

pub mod client;
pub mod talk;

pub use client::{ApiClient, BookingOutcome, endpoint_url};
pub use talk::{TalkSession, is_quit};
