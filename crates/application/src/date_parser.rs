//! Spoken date parsing
//!
//! Turns the way people say a visit date ("tomorrow", "next friday",
//! "5th December", "December the 5th", "2026-12-05") into a calendar day.
//! Everything is resolved relative to an explicit `today` so results are
//! reproducible.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use tracing::debug;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|\
                      november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

#[allow(clippy::expect_used)] // Infallible with valid static patterns
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static date pattern must compile")
}

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b"));

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTHS})\b"
    ))
});

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b({MONTHS})\s+(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\b"
    ))
});

static WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(next\s+|this\s+|on\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
});

static RELATIVE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(day after tomorrow|tomorrow|today|tonight)\b"));

/// A date found in a transcript, with the byte span it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub span: Range<usize>,
}

/// Parse the first date mentioned in `input`
pub fn parse_spoken_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    find_spoken_date(&input.to_lowercase(), today).map(|m| m.date)
}

/// Find a date in already lower-cased text
///
/// Explicit calendar dates win over relative words so that
/// "tomorrow, I mean the 5th of december" resolves to December 5th.
pub fn find_spoken_date(lower: &str, today: NaiveDate) -> Option<DateMatch> {
    let found = find_iso(lower)
        .or_else(|| find_day_month(lower, today))
        .or_else(|| find_relative(lower, today))
        .or_else(|| find_weekday(lower, today));

    match &found {
        Some(m) => debug!(input = %lower, date = %m.date, "Parsed spoken date"),
        None => debug!(input = %lower, "No date found"),
    }
    found
}

fn find_iso(lower: &str) -> Option<DateMatch> {
    let caps = ISO_DATE.captures(lower)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    let span = caps.get(0)?.range();
    NaiveDate::from_ymd_opt(year, month, day).map(|date| DateMatch { date, span })
}

fn find_day_month(lower: &str, today: NaiveDate) -> Option<DateMatch> {
    let day_first = DAY_MONTH
        .captures(lower)
        .and_then(|c| Some((c.get(0)?.range(), c[1].to_string(), c[2].to_string())));
    let month_first = MONTH_DAY
        .captures(lower)
        .and_then(|c| Some((c.get(0)?.range(), c[2].to_string(), c[1].to_string())));

    // Take whichever phrasing appears first in the sentence
    let (span, day, month) = match (day_first, month_first) {
        (Some(a), Some(b)) => {
            if a.0.start <= b.0.start {
                a
            } else {
                b
            }
        },
        (a, b) => a.or(b)?,
    };

    let day: u32 = day.parse().ok()?;
    let month = month_number(&month)?;
    upcoming_month_day(today, month, day).map(|date| DateMatch { date, span })
}

fn find_relative(lower: &str, today: NaiveDate) -> Option<DateMatch> {
    let m = RELATIVE.find(lower)?;
    let date = match m.as_str() {
        "day after tomorrow" => today + Duration::days(2),
        "tomorrow" => today + Duration::days(1),
        _ => today,
    };
    Some(DateMatch {
        date,
        span: m.range(),
    })
}

fn find_weekday(lower: &str, today: NaiveDate) -> Option<DateMatch> {
    let caps = WEEKDAY.captures(lower)?;
    let weekday: Weekday = caps[2].parse().ok()?;
    let force_next = caps
        .get(1)
        .is_some_and(|prefix| prefix.as_str().starts_with("next"));
    Some(DateMatch {
        date: next_weekday(today, weekday, force_next),
        span: caps.get(0)?.range(),
    })
}

/// Find the next occurrence of a weekday
///
/// The same weekday as `from` means today unless `force_next` is set.
fn next_weekday(from: NaiveDate, target: Weekday, force_next: bool) -> NaiveDate {
    let current = from.weekday().num_days_from_monday();
    let target = target.num_days_from_monday();

    let days_until = match target.cmp(&current) {
        std::cmp::Ordering::Greater => target - current,
        std::cmp::Ordering::Less => 7 - (current - target),
        std::cmp::Ordering::Equal if force_next => 7,
        std::cmp::Ordering::Equal => 0,
    };

    from + Duration::days(i64::from(days_until))
}

/// The next `month`/`day` on or after `today`, rolling into next year
/// when this year's date has already passed
fn upcoming_month_day(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date >= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wednesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn relative_words() {
        assert_eq!(parse_spoken_date("Today please", today()), Some(today()));
        assert_eq!(parse_spoken_date("tonight", today()), Some(today()));
        assert_eq!(parse_spoken_date("tomorrow at 7", today()), ymd(2026, 10, 15));
        assert_eq!(
            parse_spoken_date("the day after tomorrow", today()),
            ymd(2026, 10, 16)
        );
    }

    #[test]
    fn day_then_month() {
        assert_eq!(
            parse_spoken_date("5th December at 7 pm", today()),
            ymd(2026, 12, 5)
        );
        assert_eq!(
            parse_spoken_date("the 21st of november", today()),
            ymd(2026, 11, 21)
        );
    }

    #[test]
    fn month_then_day() {
        assert_eq!(parse_spoken_date("December 5", today()), ymd(2026, 12, 5));
        assert_eq!(
            parse_spoken_date("on nov the 3rd", today()),
            ymd(2026, 11, 3)
        );
    }

    #[test]
    fn past_dates_roll_into_next_year() {
        assert_eq!(parse_spoken_date("March 3rd", today()), ymd(2027, 3, 3));
        assert_eq!(parse_spoken_date("14 october", today()), Some(today()));
    }

    #[test]
    fn iso_dates_are_taken_literally() {
        assert_eq!(parse_spoken_date("2026-12-24", today()), ymd(2026, 12, 24));
        assert_eq!(parse_spoken_date("2026-02-30", today()), None);
    }

    #[test]
    fn weekdays() {
        assert_eq!(parse_spoken_date("friday", today()), ymd(2026, 10, 16));
        assert_eq!(parse_spoken_date("on Monday", today()), ymd(2026, 10, 19));
        assert_eq!(parse_spoken_date("wednesday", today()), Some(today()));
        assert_eq!(
            parse_spoken_date("next wednesday", today()),
            ymd(2026, 10, 21)
        );
    }

    #[test]
    fn explicit_date_beats_relative_word() {
        assert_eq!(
            parse_spoken_date("tomorrow, no wait, the 5th of december", today()),
            ymd(2026, 12, 5)
        );
    }

    #[test]
    fn invalid_day_is_rejected() {
        assert_eq!(parse_spoken_date("31st of november", today()), None);
    }

    #[test]
    fn may_as_a_verb_is_not_a_month() {
        assert_eq!(parse_spoken_date("may I book for friday", today()), ymd(2026, 10, 16));
    }

    #[test]
    fn span_covers_the_date_phrase() {
        let text = "5th december at 7";
        let m = find_spoken_date(text, today()).unwrap();
        assert_eq!(&text[m.span], "5th december");
    }

    #[test]
    fn no_date() {
        assert_eq!(parse_spoken_date("at seven", today()), None);
    }
}
