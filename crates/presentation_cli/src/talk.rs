//! Console booking conversation
//!
//! Drives [`BookingDialogue`] with typed or transcribed input and performs
//! the I/O the dialogue asks for: special-request checks, the weather
//! lookup that picks the seating, and the booking itself.

use application::{BookingDialogue, DialogueAction, DialogueReply, NewBooking};
use chrono::NaiveDate;
use domain::value_objects::DialogueStep;
use tracing::{debug, info, warn};

use crate::client::{ApiClient, BookingOutcome};

/// One caller's conversation with the booking assistant
#[derive(Debug)]
pub struct TalkSession {
    client: ApiClient,
    dialogue: BookingDialogue,
    today: NaiveDate,
}

impl TalkSession {
    pub fn new(client: ApiClient, today: NaiveDate) -> Self {
        Self {
            client,
            dialogue: BookingDialogue::new(),
            today,
        }
    }

    pub const fn greeting() -> &'static str {
        BookingDialogue::greeting()
    }

    pub const fn dialogue(&self) -> &BookingDialogue {
        &self.dialogue
    }

    /// Answer one transcript with the lines to speak, in order
    pub async fn respond(&mut self, transcript: &str) -> Vec<String> {
        let before = self.dialogue.step();
        let mut reply = self.dialogue.handle_transcript(transcript, self.today);

        if before == DialogueStep::Special && reply.step == DialogueStep::Confirm {
            reply = self.check_special_request().await.unwrap_or(reply);
        }

        let mut lines = vec![reply.prompt.clone()];
        match reply.action {
            DialogueAction::Submit => lines.extend(self.submit().await),
            DialogueAction::Continue if reply.step == DialogueStep::Confirm => {
                lines.push(self.dialogue.summary());
            },
            _ => {},
        }
        lines
    }

    /// Reject the pending special request if the ML service says it cannot
    /// be honoured. An unreachable service accepts it.
    async fn check_special_request(&mut self) -> Option<DialogueReply> {
        let request = self.dialogue.draft().special_requests.clone()?;
        match self.client.validate_request(&request).await {
            Ok(verdict) if !verdict.valid => {
                info!(reason = %verdict.reason, "Special request rejected");
                Some(self.dialogue.reject_special_request(&verdict.reason))
            },
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Special request check failed, accepting request");
                None
            },
        }
    }

    async fn submit(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut weather_info = None;

        let draft = self.dialogue.draft().clone();
        if let (Some(date), Some(location)) = (draft.booking_date, draft.location.as_deref()) {
            match self.client.weather(date, location).await {
                Ok(advice) => {
                    let seating = advice
                        .condition
                        .recommended_seating(draft.seating_preference);
                    debug!(condition = %advice.condition, %seating, "Seating from forecast");
                    self.dialogue.set_seating_preference(seating);
                    lines.push(advice.suggestion);
                    weather_info = Some(advice.raw);
                },
                Err(e) => warn!(error = %e, "Weather lookup failed, booking without forecast"),
            }
        }

        let draft = self.dialogue.draft();
        let request = NewBooking {
            customer_name: draft.customer_name.clone().unwrap_or_default(),
            number_of_guests: draft.number_of_guests.unwrap_or_default(),
            booking_date: draft.booking_date,
            booking_time: draft.booking_time.clone().unwrap_or_default(),
            location: draft.location.clone(),
            cuisine_preference: draft.cuisine.map(|c| c.to_string()),
            special_requests: draft.special_requests.clone(),
            weather_info,
            seating_preference: Some(draft.seating_preference),
            status: None,
        };

        let reply = match self.client.create_booking(&request).await {
            Ok(BookingOutcome::Confirmed(booking)) => {
                info!(booking_id = %booking.booking_id, "Booking confirmed");
                self.dialogue.on_booking_confirmed(&booking).prompt
            },
            Ok(BookingOutcome::CapacityExceeded(message)) => {
                self.dialogue.on_capacity_exceeded(&message).prompt
            },
            Err(e) => {
                warn!(error = %e, "Booking failed");
                format!(
                    "Sorry, I couldn't complete the booking ({e}). \
                     Say confirm booking to try again."
                )
            },
        };
        lines.push(reply);
        lines
    }
}

/// Commands that end the console session
pub fn is_quit(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "quit" | "exit" | "bye" | "goodbye"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_words() {
        assert!(is_quit("quit"));
        assert!(is_quit("  Exit "));
        assert!(!is_quit("quite a table"));
    }

    #[test]
    fn greeting_matches_dialogue() {
        assert_eq!(TalkSession::greeting(), BookingDialogue::greeting());
    }
}
