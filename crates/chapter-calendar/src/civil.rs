//! Civil days -- the calendar date an instant falls on in a given timezone.
//!
//! All day-level decisions in the crate (grid membership, bucketing, same-day
//! checks in the formatter) go through [`civil_day`], which asks `chrono-tz`
//! for the wall-clock date instead of adding a fixed UTC offset. Fixed-offset
//! arithmetic is wrong on both sides of a DST transition.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalendarError, Result};

/// Naive (offset-less) datetime layouts accepted by [`parse_instant`].
///
/// Store rows arrive either as ISO strings or as SQL-style `"2025-09-21 08:00:00"`.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an IANA timezone name (e.g. `"America/Chicago"`).
///
/// # Errors
/// Returns `CalendarError::InvalidTimezone` if the name is not in the tz database.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| CalendarError::InvalidTimezone(name.to_string()))
}

/// The calendar date `instant` falls on when viewed in `tz`.
pub fn civil_day(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Canonical `YYYY-MM-DD` key for the civil day of `instant` in `tz`.
///
/// Two instants share a key iff they render to the same date in `tz`.
pub fn day_key(instant: DateTime<Utc>, tz: Tz) -> String {
    date_key(civil_day(instant, tz))
}

/// `YYYY-MM-DD` key for a date that is already civil.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The first instant of `date` in `tz`.
///
/// Usually local midnight. In zones that spring forward at midnight the day
/// starts when the gap ends (e.g. 01:00), and on a repeated midnight the
/// earlier of the two instants is used.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    resolve_local(date.and_time(NaiveTime::MIN), tz)
}

/// Map a wall-clock datetime in `tz` to an instant.
///
/// Ambiguous times (fall back) take the earlier instant. Times inside a DST
/// gap move forward to the first valid wall time after the gap.
pub fn resolve_local(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    (0..=4)
        .map(|step| local + Duration::minutes(30 * step))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

/// Parse an instant from any of the textual forms the event store produces.
///
/// - RFC 3339 with an offset or `Z` is taken as-is.
/// - Naive datetimes (`T` or space separated) are wall-clock times in `tz`.
/// - A bare `YYYY-MM-DD` is the start of that day in `tz`.
///
/// Returns `None` for anything else; callers decide whether that is an error.
pub fn parse_instant(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
            return Some(resolve_local(local, tz));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| start_of_day(date, tz))
}

/// Like [`parse_instant`], but reports the offending input.
///
/// # Errors
/// Returns `CalendarError::InvalidInstant` if `s` is not a recognised instant.
pub fn require_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    parse_instant(s, tz).ok_or_else(|| CalendarError::InvalidInstant(s.to_string()))
}

/// Parse a `YYYY-MM` month into its first day.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if the input is not a valid month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidMonth(s.to_string()))
}
