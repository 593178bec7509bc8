//! Heuristics that pull booking fields out of free-text transcripts
//!
//! Speech-to-text output is messy: leading filler words, polite preambles,
//! punctuation, "p.m." spelled with dots. Each extractor tolerates that and
//! returns `None` when the answer does not contain what was asked for.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::date_parser::find_spoken_date;

#[allow(clippy::expect_used)] // Infallible with valid static patterns
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static transcript pattern must compile")
}

static LEADING_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^(?:okay|ok|yes|yeah|sure|alright|all\s+right|well|um+|uh+|hi|hello|so)\b[\s,.!]*")
});

static NAME_INTRO: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^(?:my\s+name\s+is|my\s+name's|name\s+is|i\s+am|i'm|this\s+is|it\s+is|it's|its)\s+")
});

static CALL_ME: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:you\s+can\s+)?call\s+me\s+"));

static CITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:in|at)\s+(?:the\s+city\s+of\s+)?"));

static GUEST_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"\b(\d+|zero|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|",
        r"thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)\b",
    ))
});

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d{1,2}):(\d{2})(?:\s?(am|pm))?\b"));

static MERIDIEM_TIME: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(\d{1,2})\s?(am|pm)\b"));

static AT_HOUR: LazyLock<Regex> = LazyLock::new(|| compile(r"\bat\s+(\d{1,2})\b"));

static OCLOCK_HOUR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d{1,2})\s*o'?\s?clock\b"));

static BARE_HOUR: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(\d{1,2})\b"));

static RESTART: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:start\s+over|restart|start\s+again|begin\s+again)\b"));

static AFFIRMATIVE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:yes|yeah|yep|confirm|confirmed|book\s+it|correct|sure|go\s+ahead|looks\s+good)\b")
});

static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:no|nope|not|don't|dont|do\s+not|never|change|wrong)\b")
});

static DECLINED_REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?:none|nothing|no|nope|nah)(?:[,\s]+(?:thanks|thank\s+you))?$|\bno\b.*\b(?:special|requests?)\b")
});

/// Lower-case a transcript and smooth out spelling variants the
/// extractors do not care about
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
        .replace("p.m.", "pm")
        .replace("a.m.", "am")
        .replace("p. m.", "pm")
        .replace("a. m.", "am")
}

/// Customer name from an answer like "Um, my name is ada lovelace."
pub fn extract_name(text: &str) -> Option<String> {
    let text = text.trim().replace(['\u{2019}', '\u{2018}'], "'");
    let rest = strip_fillers(&text);
    let rest = NAME_INTRO.replace(rest, "");
    let rest = CALL_ME.replace(&rest, "");
    clean_proper_noun(&rest)
}

/// City from an answer like "In new york."
pub fn extract_city(text: &str) -> Option<String> {
    let rest = strip_fillers(text.trim());
    let rest = CITY_PREFIX.replace(rest, "");
    clean_proper_noun(&rest)
}

/// Party size from an answer like "a table for two"; zero is not a party
pub fn extract_guest_count(text: &str) -> Option<u32> {
    let lower = normalize(text);
    let word = GUEST_COUNT.find(&lower)?.as_str();
    let count = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        digits => digits.parse().ok()?,
    };
    (count > 0).then_some(count)
}

/// Date and time from an answer like "5th December at 7 pm"
///
/// The date phrase is masked before looking for the time so the day of
/// the month is never mistaken for an hour.
pub fn extract_date_and_time(text: &str, today: NaiveDate) -> (Option<NaiveDate>, Option<String>) {
    let lower = normalize(text);
    match find_spoken_date(&lower, today) {
        Some(found) => {
            let mut masked = lower.clone();
            masked.replace_range(found.span.clone(), &" ".repeat(found.span.len()));
            (Some(found.date), extract_time(&masked))
        },
        None => (None, extract_time(&lower)),
    }
}

/// Time label from already normalized text
///
/// Returns labels such as "7 pm", "7:30 pm" or "19:30". An hour from 1 to
/// 12 said without am/pm is taken as evening.
pub fn extract_time(lower: &str) -> Option<String> {
    if let Some(caps) = CLOCK_TIME.captures(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour <= 23 && minute <= 59 {
            return Some(match caps.get(3) {
                Some(meridiem) => format!("{hour}:{minute:02} {}", meridiem.as_str()),
                None if (1..=12).contains(&hour) => format!("{hour}:{minute:02} pm"),
                None => format!("{hour}:{minute:02}"),
            });
        }
    }

    if let Some(caps) = MERIDIEM_TIME.captures(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        if (1..=12).contains(&hour) {
            return Some(format!("{hour} {}", &caps[2]));
        }
    }

    [&*AT_HOUR, &*OCLOCK_HOUR, &*BARE_HOUR]
        .into_iter()
        .flat_map(|pattern| pattern.captures_iter(lower))
        .find_map(|caps| caps[1].parse::<u32>().ok().and_then(bare_hour_label))
}

fn bare_hour_label(hour: u32) -> Option<String> {
    match hour {
        1..=12 => Some(format!("{hour} pm")),
        0 | 13..=23 => Some(format!("{hour}:00")),
        _ => None,
    }
}

/// The caller wants to begin the conversation again
pub fn is_restart(text: &str) -> bool {
    RESTART.is_match(&normalize(text))
}

pub fn is_affirmative(text: &str) -> bool {
    AFFIRMATIVE.is_match(&normalize(text))
}

/// A "no", a request to change something, or a negated affirmative
/// such as "not correct"
pub fn is_negative(text: &str) -> bool {
    NEGATIVE.is_match(&normalize(text))
}

/// The caller has nothing special to ask for
pub fn declines_special_request(text: &str) -> bool {
    let lower = normalize(text);
    let lower = lower.trim_matches(|c: char| !c.is_alphanumeric());
    lower.is_empty() || DECLINED_REQUEST.is_match(lower)
}

fn strip_fillers(text: &str) -> &str {
    let mut rest = text;
    while let Some(m) = LEADING_FILLER.find(rest) {
        if m.is_empty() {
            break;
        }
        rest = &rest[m.end()..];
    }
    rest
}

fn clean_proper_noun(text: &str) -> Option<String> {
    let words: Vec<&str> = text
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(title_case(&words.join(" ")))
}

/// Upper-case the first letter of every word and lower-case the rest;
/// apostrophes and hyphens start a new word
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn name_strips_preamble_and_punctuation() {
        assert_eq!(extract_name("My name is ada lovelace."), Some("Ada Lovelace".into()));
        assert_eq!(extract_name("Um, okay, I'm Grace"), Some("Grace".into()));
        assert_eq!(extract_name("call me ishmael!"), Some("Ishmael".into()));
        assert_eq!(extract_name("It\u{2019}s Bob"), Some("Bob".into()));
    }

    #[test]
    fn name_keeps_words_that_start_like_fillers() {
        assert_eq!(extract_name("Uma Thurman"), Some("Uma Thurman".into()));
        assert_eq!(extract_name("Wellington"), Some("Wellington".into()));
    }

    #[test]
    fn shouted_or_mixed_case_names_are_title_cased() {
        assert_eq!(extract_name("MY NAME IS ADA LOVELACE"), Some("Ada Lovelace".into()));
        assert_eq!(extract_name("my name is aDA"), Some("Ada".into()));
        assert_eq!(extract_city("in NEW YORK"), Some("New York".into()));
        assert_eq!(extract_name("THIS IS MARY O'NEIL-SMITH"), Some("Mary O'Neil-Smith".into()));
    }

    #[test]
    fn title_case_handles_apostrophes_and_hyphens() {
        assert_eq!(extract_name("this is mary o'neil-smith"), Some("Mary O'Neil-Smith".into()));
    }

    #[test]
    fn empty_name_is_none() {
        assert_eq!(extract_name("um."), None);
        assert_eq!(extract_name("   "), None);
    }

    #[test]
    fn city_strips_preposition() {
        assert_eq!(extract_city("In new york."), Some("New York".into()));
        assert_eq!(extract_city("at the city of Rome"), Some("Rome".into()));
        assert_eq!(extract_city("Berlin"), Some("Berlin".into()));
        assert_eq!(extract_city("in"), Some("In".into()));
    }

    #[test]
    fn guest_count_from_digits_and_words() {
        assert_eq!(extract_guest_count("table for 4"), Some(4));
        assert_eq!(extract_guest_count("A table for two, please"), Some(2));
        assert_eq!(extract_guest_count("Seventeen of us"), Some(17));
        assert_eq!(extract_guest_count("seven"), Some(7));
    }

    #[test]
    fn zero_or_missing_guests_is_none() {
        assert_eq!(extract_guest_count("0"), None);
        assert_eq!(extract_guest_count("just a few"), None);
    }

    #[test]
    fn times_with_meridiem() {
        assert_eq!(extract_time("7 pm"), Some("7 pm".into()));
        assert_eq!(extract_time("at 7pm"), Some("7 pm".into()));
        assert_eq!(extract_time(&normalize("8 P.M.")), Some("8 pm".into()));
        assert_eq!(extract_time("11 am"), Some("11 am".into()));
    }

    #[test]
    fn clock_times() {
        assert_eq!(extract_time("7:30 pm"), Some("7:30 pm".into()));
        assert_eq!(extract_time("at 7:30"), Some("7:30 pm".into()));
        assert_eq!(extract_time("19:45"), Some("19:45".into()));
        assert_eq!(extract_time("12:05am"), Some("12:05 am".into()));
    }

    #[test]
    fn bare_hours_default_to_evening() {
        assert_eq!(extract_time("at 8"), Some("8 pm".into()));
        assert_eq!(extract_time("7 o'clock"), Some("7 pm".into()));
        assert_eq!(extract_time("around 20"), Some("20:00".into()));
    }

    #[test]
    fn hour_after_at_wins_over_earlier_numbers() {
        assert_eq!(extract_time("for 4 people at 9"), Some("9 pm".into()));
    }

    #[test]
    fn no_time() {
        assert_eq!(extract_time("in the evening"), None);
        assert_eq!(extract_time("at 99"), None);
    }

    #[test]
    fn date_and_time_together() {
        let (date, time) = extract_date_and_time("5th December at 7 pm", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 5));
        assert_eq!(time.as_deref(), Some("7 pm"));
    }

    #[test]
    fn day_of_month_is_not_read_as_hour() {
        let (date, time) = extract_date_and_time("December 5", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 5));
        assert_eq!(time, None);
    }

    #[test]
    fn time_only_answer() {
        let (date, time) = extract_date_and_time("at 8:15 p.m.", today());
        assert_eq!(date, None);
        assert_eq!(time.as_deref(), Some("8:15 pm"));
    }

    #[test]
    fn tomorrow_with_bare_hour() {
        let (date, time) = extract_date_and_time("Tomorrow 7", today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 15));
        assert_eq!(time.as_deref(), Some("7 pm"));
    }

    #[test]
    fn confirmations() {
        assert!(is_affirmative("Yes, confirm booking."));
        assert!(is_affirmative("looks good"));
        assert!(!is_affirmative("yesterday"));
        assert!(is_negative("No, that's wrong"));
        assert!(!is_negative("I know"));
        assert!(is_negative("No, that's not correct"));
        assert!(is_negative("I\u{2019}m not sure"));
        assert!(is_negative("don't book it"));
        assert!(is_negative("do not confirm"));
        assert!(!is_negative("Yes, book it"));
        assert!(is_restart("let's start over"));
        assert!(!is_restart("start the booking"));
    }

    #[test]
    fn declined_special_requests() {
        assert!(declines_special_request("No special requests."));
        assert!(declines_special_request("none"));
        assert!(declines_special_request("Nope, thank you"));
        assert!(declines_special_request("no requests"));
        assert!(declines_special_request(""));
        assert!(!declines_special_request("It's my wife's birthday"));
        assert!(!declines_special_request("A window table, no peanuts"));
    }
}
