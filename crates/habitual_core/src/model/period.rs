//! Local-time period math shared by completion and streak logic.
//!
//! # Responsibility
//! - Define the calendar windows habits are judged against: one day, or one
//!   Monday-start week.
//! - Provide the single wall-clock entry point and the instant wire codec.
//!
//! # Invariants
//! - Ordinals of consecutive periods of the same kind differ by exactly 1.
//! - A week starts at midnight of its most recent Monday (half-open window).
//! - Captured instants are truncated to microseconds so persisted values
//!   round-trip exactly.

use crate::model::habit::Periodicity;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Wire format for instants: ISO-8601 with a fixed microsecond fraction.
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Returns the current local wall-clock time at microsecond precision.
pub fn now_local() -> NaiveDateTime {
    truncate_to_micros(Local::now().naive_local())
}

/// Drops sub-microsecond precision from an instant.
///
/// Storage keeps six fractional digits; anything finer would be lost on the
/// first save/load cycle, so it is dropped up front.
pub fn truncate_to_micros(instant: NaiveDateTime) -> NaiveDateTime {
    let micros_only = instant.nanosecond() / 1_000 * 1_000;
    instant.with_nanosecond(micros_only).unwrap_or(instant)
}

/// Returns the most recent Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Returns midnight at the start of the week containing `date`.
pub fn week_start_instant(date: NaiveDate) -> NaiveDateTime {
    week_start(date).and_time(NaiveTime::MIN)
}

/// Ordinal of the calendar day containing `date`.
pub fn day_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

/// Ordinal of the Monday-start week containing `date`.
pub fn week_ordinal(date: NaiveDate) -> i64 {
    // Week starts are spaced exactly 7 days apart, so flooring keeps
    // consecutive weeks on consecutive ordinals.
    day_ordinal(week_start(date)).div_euclid(7)
}

/// Ordinal of the period containing `instant` for the given cadence.
pub fn period_ordinal(periodicity: Periodicity, instant: NaiveDateTime) -> i64 {
    match periodicity {
        Periodicity::Daily => day_ordinal(instant.date()),
        Periodicity::Weekly => week_ordinal(instant.date()),
    }
}

/// Encodes an instant for the persisted record format.
pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}

/// Decodes an instant from the persisted record format.
///
/// The fractional part is optional on input; output always carries six
/// digits.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    value.parse::<NaiveDateTime>()
}
