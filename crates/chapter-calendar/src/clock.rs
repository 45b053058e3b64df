//! Injected capabilities: the current time and locale-aware formatting.
//!
//! The range formatter and the month grid only decide the *shape* of their
//! output. "What time is it" and "how is a date spelled in this locale" are
//! behind the [`Clock`] and [`Formatter`] traits so the branching can be
//! tested with a fixed clock.

use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::civil;
use crate::error::{CalendarError, Result};

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's civil date in `tz`.
    fn today(&self, tz: Tz) -> NaiveDate {
        civil::civil_day(self.now(), tz)
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock precision for rendered times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// Hours and minutes (`9:00 AM`).
    #[default]
    Short,
    /// Hours, minutes and seconds (`9:00:00 AM`).
    Medium,
}

/// Which fields of an instant to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateParts {
    /// Abbreviated month and day, optionally with weekday and year (`Mon, Sep 8, 2025`).
    Date { weekday: bool, year: bool },
    /// Abbreviated month and day only (`Sep 8`).
    MonthDay,
    /// Day of month only (`10`).
    Day,
    /// Full month name and year (`September 2025`).
    MonthYear,
    /// Time of day.
    Time(TimeFormat),
}

/// Locale-aware rendering of instants.
pub trait Formatter {
    /// Civil day of `instant` in `tz`. Same-day decisions must agree with rendering.
    fn civil_day(&self, instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
        civil::civil_day(instant, tz)
    }

    /// Render the requested `parts` of `instant` as seen in `tz`.
    fn format_parts(&self, instant: DateTime<Utc>, tz: Tz, parts: DateParts) -> String;
}

/// [`Formatter`] backed by chrono's localized strftime.
#[derive(Debug, Clone, Copy)]
pub struct ChronoFormatter {
    locale: Locale,
    twelve_hour: bool,
}

impl ChronoFormatter {
    /// Build a formatter for a BCP 47 style locale tag (`"en-US"`, `"fr_FR"`).
    ///
    /// Locales without AM/PM markers render a 24-hour clock.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidLocale` if the locale is unknown.
    pub fn new(locale: &str) -> Result<Self> {
        let normalized = locale.trim().replace('-', "_");
        let locale = Locale::try_from(normalized.as_str())
            .map_err(|_| CalendarError::InvalidLocale(locale.to_string()))?;
        let twelve_hour = !DateTime::<Utc>::default()
            .format_localized("%p", locale)
            .to_string()
            .trim()
            .is_empty();
        Ok(Self {
            locale,
            twelve_hour,
        })
    }

    pub fn en_us() -> Self {
        Self {
            locale: Locale::en_US,
            twelve_hour: true,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn pattern(&self, parts: DateParts) -> &'static str {
        match parts {
            DateParts::Date {
                weekday: true,
                year: true,
            } => "%a, %b %-d, %Y",
            DateParts::Date {
                weekday: true,
                year: false,
            } => "%a, %b %-d",
            DateParts::Date {
                weekday: false,
                year: true,
            } => "%b %-d, %Y",
            DateParts::Date {
                weekday: false,
                year: false,
            } => "%b %-d",
            DateParts::MonthDay => "%b %-d",
            DateParts::Day => "%-d",
            DateParts::MonthYear => "%B %Y",
            DateParts::Time(TimeFormat::Short) if self.twelve_hour => "%-I:%M %p",
            DateParts::Time(TimeFormat::Medium) if self.twelve_hour => "%-I:%M:%S %p",
            DateParts::Time(TimeFormat::Short) => "%H:%M",
            DateParts::Time(TimeFormat::Medium) => "%H:%M:%S",
        }
    }
}

impl Default for ChronoFormatter {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Formatter for ChronoFormatter {
    fn format_parts(&self, instant: DateTime<Utc>, tz: Tz, parts: DateParts) -> String {
        instant
            .with_timezone(&tz)
            .format_localized(self.pattern(parts), self.locale)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::Chicago;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 8, 14, 5, 9).unwrap()
    }

    #[test]
    fn en_us_parts() {
        let f = ChronoFormatter::en_us();
        let at = instant();
        assert_eq!(
            f.format_parts(at, Chicago, DateParts::Date { weekday: true, year: false }),
            "Mon, Sep 8"
        );
        assert_eq!(
            f.format_parts(at, Chicago, DateParts::Date { weekday: false, year: true }),
            "Sep 8, 2025"
        );
        assert_eq!(f.format_parts(at, Chicago, DateParts::Day), "8");
        assert_eq!(f.format_parts(at, Chicago, DateParts::MonthYear), "September 2025");
        assert_eq!(
            f.format_parts(at, Chicago, DateParts::Time(TimeFormat::Short)),
            "9:05 AM"
        );
        assert_eq!(
            f.format_parts(at, Chicago, DateParts::Time(TimeFormat::Medium)),
            "9:05:09 AM"
        );
    }

    #[test]
    fn locale_tags_accept_hyphen_or_underscore() {
        assert!(ChronoFormatter::new("en-US").is_ok());
        assert!(ChronoFormatter::new("en_US").is_ok());
        assert!(matches!(
            ChronoFormatter::new("xx-NOPE"),
            Err(CalendarError::InvalidLocale(_))
        ));
    }

    #[test]
    fn fixed_clock_reports_today_in_zone() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 9, 9, 2, 0, 0).unwrap());
        assert_eq!(clock.today(Chicago), NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
    }
}
