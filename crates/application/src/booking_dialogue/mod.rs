//! Voice booking conversation
//!
//! A deterministic step machine that walks a caller through name, city,
//! party size, date and time, cuisine and special requests, then asks for
//! confirmation. Every transcript produces exactly one spoken reply; the
//! machine never performs I/O itself. When the caller confirms, the reply
//! carries [`DialogueAction::Submit`] and the client does the booking,
//! reporting the outcome back through [`BookingDialogue::on_booking_confirmed`]
//! or [`BookingDialogue::on_capacity_exceeded`].

pub mod transcript;

use chrono::NaiveDate;
use domain::entities::{Booking, BookingDraft};
use domain::value_objects::{Cuisine, DialogueStep, SeatingPreference};
use tracing::debug;

pub const GREETING: &str = "Hi! I can help you book a table at our restaurant. \
                            Please tap the microphone and tell me your name.";
pub const RESTART_PROMPT: &str = "Sure. Let's start over. Please tell me your name.";
const NOT_HEARD: &str = "I didn't catch that. Please try again.";
const ASK_NAME_AGAIN: &str = "Sorry, I didn't catch your name. Please tell me your name.";
const ASK_CITY_AGAIN: &str =
    "Sorry, I didn't catch the city. Which city would you like to make your booking in?";
const ASK_GUESTS_AGAIN: &str =
    "I couldn't catch the number of guests. Please say something like: table for 2.";
const ASK_DATETIME: &str = "Great. On which date and at what time would you like to book? \
                            For example, say: 5th December at 7 pm.";
const ASK_DATETIME_AGAIN: &str = "I couldn't catch the date and time. \
                                  Please say something like: 5th December at 7 pm.";
const ASK_CUISINE: &str =
    "Got it. What kind of cuisine do you prefer? We offer Italian, Indian, or Chinese.";
const ASK_CUISINE_AGAIN: &str =
    "Sorry, we only offer Italian, Indian, or Chinese cuisine. Which one would you prefer?";
const ASK_SPECIAL: &str = "Any special requests? For example a birthday, anniversary, or dietary \
                           preferences. You can also say no special requests.";
const ASK_CONFIRM: &str = "Thanks. Please quickly review the booking details. \
                           Once it looks good, say confirm booking.";
const ASK_CONFIRM_AGAIN: &str = "Please say confirm booking when the details look right, \
                                 or start over to change them.";
const ASK_CONFIRM_UPDATED: &str = "Got it, I've updated the date and time. \
                                   Once the details look good, say confirm booking.";
const SUBMITTING: &str = "Perfect, booking your table now.";
const INCOMPLETE: &str = "Please fill name, guests, date, and time.";

/// What the client should do after speaking the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueAction {
    /// Wait for the next transcript
    Continue,
    /// The caller confirmed; submit the draft
    Submit,
    /// The draft was discarded and the conversation began again
    Restarted,
    /// The booking went through and the conversation was reset
    Completed,
}

/// The assistant's answer to one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueReply {
    /// Text to speak
    pub prompt: String,
    /// Step the conversation is on after this reply
    pub step: DialogueStep,
    pub action: DialogueAction,
}

/// State of one booking conversation
#[derive(Debug, Clone, Default)]
pub struct BookingDialogue {
    step: DialogueStep,
    draft: BookingDraft,
}

impl BookingDialogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening line, spoken before the first transcript
    #[must_use]
    pub const fn greeting() -> &'static str {
        GREETING
    }

    #[must_use]
    pub const fn step(&self) -> DialogueStep {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Override the seating choice, e.g. after a weather lookup
    pub fn set_seating_preference(&mut self, seating: SeatingPreference) {
        self.draft.seating_preference = seating;
    }

    /// Advance the conversation with one transcript
    pub fn handle_transcript(&mut self, transcript: &str, today: NaiveDate) -> DialogueReply {
        let transcript = transcript.trim();
        debug!(step = ?self.step, %transcript, "Handling transcript");

        if transcript.is_empty() {
            return self.reply(NOT_HEARD, DialogueAction::Continue);
        }
        if transcript::is_restart(transcript) {
            return self.restart();
        }

        match self.step {
            DialogueStep::Name => self.on_name(transcript),
            DialogueStep::City => self.on_city(transcript),
            DialogueStep::Guests => self.on_guests(transcript),
            DialogueStep::DateTime => self.on_date_time(transcript, today),
            DialogueStep::Cuisine => self.on_cuisine(transcript),
            DialogueStep::Special => self.on_special(transcript),
            DialogueStep::Confirm => self.on_confirm(transcript),
        }
    }

    /// Discard the draft and begin again
    pub fn restart(&mut self) -> DialogueReply {
        *self = Self::default();
        self.reply(RESTART_PROMPT, DialogueAction::Restarted)
    }

    /// The special request cannot be honoured; ask for another one
    pub fn reject_special_request(&mut self, reason: &str) -> DialogueReply {
        self.draft.special_requests = None;
        self.step = DialogueStep::Special;
        let reason = reason.trim().trim_end_matches('.');
        let prompt = format!(
            "Sorry, we can't accommodate that request: {reason}. \
             Is there anything else, or should we continue with no special requests?"
        );
        self.reply(prompt, DialogueAction::Continue)
    }

    /// The server accepted the booking; announce it and reset
    pub fn on_booking_confirmed(&mut self, booking: &Booking) -> DialogueReply {
        let mut prompt = format!(
            "All set, {}. Your booking has been confirmed for {} guests on {} at {}.",
            booking.customer_name,
            booking.number_of_guests,
            booking.booking_date.format("%Y-%m-%d"),
            booking.booking_time,
        );
        if let Some(cuisine) = &booking.cuisine_preference {
            prompt.push_str(&format!(" Cuisine preference: {cuisine}."));
        }
        if booking.seating_preference.is_specified() {
            prompt.push_str(&format!(
                " I recommend {} seating.",
                booking.seating_preference
            ));
        }

        *self = Self::default();
        self.reply(prompt, DialogueAction::Completed)
    }

    /// The hour slot is full; go back and ask for another time
    pub fn on_capacity_exceeded(&mut self, message: &str) -> DialogueReply {
        self.draft.booking_time = None;
        self.step = DialogueStep::DateTime;
        self.reply(message, DialogueAction::Continue)
    }

    /// Human-readable review of the draft, one field per line
    #[must_use]
    pub fn summary(&self) -> String {
        fn or_dash(value: Option<String>) -> String {
            value.unwrap_or_else(|| "-".to_string())
        }

        let draft = &self.draft;
        [
            ("Name", or_dash(draft.customer_name.clone())),
            ("City", or_dash(draft.location.clone())),
            ("Guests", or_dash(draft.number_of_guests.map(|n| n.to_string()))),
            ("Date", or_dash(draft.booking_date.map(|d| d.format("%Y-%m-%d").to_string()))),
            ("Time", or_dash(draft.booking_time.clone())),
            ("Cuisine", or_dash(draft.cuisine.map(|c| c.to_string()))),
            ("Special requests", or_dash(draft.special_requests.clone())),
            ("Seating", draft.seating_preference.to_string()),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    fn on_name(&mut self, transcript: &str) -> DialogueReply {
        let Some(name) = transcript::extract_name(transcript) else {
            return self.reply(ASK_NAME_AGAIN, DialogueAction::Continue);
        };
        let prompt =
            format!("Nice to meet you, {name}. Which city would you like to make your booking in?");
        self.draft.customer_name = Some(name);
        self.advance(prompt)
    }

    fn on_city(&mut self, transcript: &str) -> DialogueReply {
        let Some(city) = transcript::extract_city(transcript) else {
            return self.reply(ASK_CITY_AGAIN, DialogueAction::Continue);
        };
        let prompt = format!("Great! {city} it is. How many guests will be joining you?");
        self.draft.location = Some(city);
        self.advance(prompt)
    }

    fn on_guests(&mut self, transcript: &str) -> DialogueReply {
        let Some(count) = transcript::extract_guest_count(transcript) else {
            return self.reply(ASK_GUESTS_AGAIN, DialogueAction::Continue);
        };
        self.draft.number_of_guests = Some(count);
        self.advance(ASK_DATETIME)
    }

    fn on_date_time(&mut self, transcript: &str, today: NaiveDate) -> DialogueReply {
        let (date, time) = transcript::extract_date_and_time(transcript, today);
        if date.is_some() {
            self.draft.booking_date = date;
        }
        if time.is_some() {
            self.draft.booking_time = time;
        }

        match (self.draft.booking_date, self.draft.booking_time.as_deref()) {
            // Back here after a full slot: the rest of the draft is still filled in
            (Some(_), Some(_)) if self.draft.cuisine.is_some() => {
                self.step = DialogueStep::Confirm;
                self.reply(ASK_CONFIRM_UPDATED, DialogueAction::Continue)
            },
            (Some(_), Some(_)) => self.advance(ASK_CUISINE),
            (Some(date), None) => {
                let prompt = format!(
                    "And at what time on {}? For example, say: 7 pm.",
                    date.format("%A, %B %-d")
                );
                self.reply(prompt, DialogueAction::Continue)
            },
            (None, Some(time)) => {
                let prompt = format!(
                    "Got it, {time}. On which date? For example, say: 5th December or tomorrow."
                );
                self.reply(prompt, DialogueAction::Continue)
            },
            (None, None) => self.reply(ASK_DATETIME_AGAIN, DialogueAction::Continue),
        }
    }

    fn on_cuisine(&mut self, transcript: &str) -> DialogueReply {
        let Some(cuisine) = Cuisine::detect(transcript) else {
            return self.reply(ASK_CUISINE_AGAIN, DialogueAction::Continue);
        };
        self.draft.cuisine = Some(cuisine);
        self.advance(ASK_SPECIAL)
    }

    fn on_special(&mut self, transcript: &str) -> DialogueReply {
        self.draft.special_requests = if transcript::declines_special_request(transcript) {
            None
        } else {
            Some(transcript.to_string())
        };
        self.advance(ASK_CONFIRM)
    }

    fn on_confirm(&mut self, transcript: &str) -> DialogueReply {
        // "not correct" and "don't book it" contain affirmative words
        if transcript::is_negative(transcript) {
            return self.restart();
        }
        if transcript::is_affirmative(transcript) {
            if !self.draft.is_ready() {
                return self.reply(INCOMPLETE, DialogueAction::Continue);
            }
            return self.reply(SUBMITTING, DialogueAction::Submit);
        }
        self.reply(ASK_CONFIRM_AGAIN, DialogueAction::Continue)
    }

    fn advance(&mut self, prompt: impl Into<String>) -> DialogueReply {
        self.step = self.step.next();
        self.reply(prompt, DialogueAction::Continue)
    }

    fn reply(&self, prompt: impl Into<String>, action: DialogueAction) -> DialogueReply {
        DialogueReply {
            prompt: prompt.into(),
            step: self.step,
            action,
        }
    }
}
