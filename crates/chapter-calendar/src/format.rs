//! Human-readable labels for an event's start/end pair.
//!
//! The formatter picks a *shape* (single day, compressed span, full range,
//! degenerate instant) from civil-day comparisons in the display timezone and
//! delegates glyphs to a [`Formatter`]. It never fails: unparseable input
//! yields the [`INVALID_DATE`] sentinel, which callers display as-is.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::civil;
use crate::clock::{Clock, DateParts, Formatter, TimeFormat};

/// Display value returned when either endpoint cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";

/// When to print the year in dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearDisplay {
    /// Only when the range crosses years or leaves the current year.
    #[default]
    Auto,
    Always,
    Never,
}

/// Options for [`format_date_range`].
///
/// The locale is carried by the [`Formatter`] passed alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// Ignore times of day.
    pub all_day: bool,
    /// Display timezone. Naive input strings are read as wall time here too.
    pub timezone: Tz,
    pub include_weekday: bool,
    pub include_year: YearDisplay,
    /// Appended as `" · @ {location}"`; blank values are ignored.
    pub include_location: Option<String>,
    pub time_format: TimeFormat,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            all_day: false,
            timezone: chrono_tz::UTC,
            include_weekday: true,
            include_year: YearDisplay::Auto,
            include_location: None,
            time_format: TimeFormat::Short,
        }
    }
}

/// Format a start/end pair given as strings.
///
/// Returns [`INVALID_DATE`] if either string is not a recognised instant
/// (see [`civil::parse_instant`]).
pub fn format_date_range(
    start: &str,
    end: &str,
    opts: &FormatOptions,
    formatter: &dyn Formatter,
    clock: &dyn Clock,
) -> String {
    let parsed = (
        civil::parse_instant(start, opts.timezone),
        civil::parse_instant(end, opts.timezone),
    );
    match parsed {
        (Some(start), Some(end)) => format_instant_range(start, end, opts, formatter, clock),
        _ => {
            tracing::warn!(start, end, "unparseable date range; rendering placeholder");
            INVALID_DATE.to_string()
        }
    }
}

/// Format a start/end pair of instants.
pub fn format_instant_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    opts: &FormatOptions,
    formatter: &dyn Formatter,
    clock: &dyn Clock,
) -> String {
    let tz = opts.timezone;
    let start_day = formatter.civil_day(start, tz);
    let end_day = formatter.civil_day(end, tz);
    let same_day = start_day == end_day;

    let current_year = clock.today(tz).year();
    let needs_year = match opts.include_year {
        YearDisplay::Always => true,
        YearDisplay::Never => false,
        YearDisplay::Auto => {
            start_day.year() != end_day.year()
                || start_day.year() != current_year
                || end_day.year() != current_year
        }
    };

    let date = |instant: DateTime<Utc>| {
        formatter.format_parts(
            instant,
            tz,
            DateParts::Date {
                weekday: opts.include_weekday,
                year: needs_year,
            },
        )
    };
    let time = |instant: DateTime<Utc>| {
        formatter.format_parts(instant, tz, DateParts::Time(opts.time_format))
    };

    let mut body = if opts.all_day {
        if same_day {
            format!("{} · All day", date(start))
        } else if start_day.year() == end_day.year()
            && start_day.month() == end_day.month()
            && !needs_year
        {
            format!(
                "{}–{}",
                formatter.format_parts(start, tz, DateParts::MonthDay),
                formatter.format_parts(end, tz, DateParts::Day)
            )
        } else {
            format!("{} – {}", date(start), date(end))
        }
    } else if end <= start {
        format!("{} · {}", date(start), time(start))
    } else if same_day {
        let end_time = time(end);
        let start_time = collapse_meridiem(&time(start), &end_time);
        format!("{} · {}–{}", date(start), start_time, end_time)
    } else {
        format!(
            "{}, {} – {}, {}",
            date(start),
            time(start),
            date(end),
            time(end)
        )
    };

    if let Some(location) = opts
        .include_location
        .as_deref()
        .filter(|l| !l.trim().is_empty())
    {
        body.push_str(" · @ ");
        body.push_str(location);
    }
    body
}

/// Drop the start time's AM/PM marker when the end time carries the same one.
///
/// `("2:00 PM", "3:30 PM")` gives `"2:00"`; `("11:00 AM", "1:00 PM")` keeps both.
fn collapse_meridiem(start: &str, end: &str) -> String {
    let suffix = end.rsplit(' ').next().unwrap_or_default();
    let upper = suffix.to_ascii_uppercase();
    let is_meridiem = upper.contains("AM") || upper.contains("PM");
    if is_meridiem && start.ends_with(suffix) {
        start.replacen(&format!(" {suffix}"), "", 1)
    } else {
        start.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::collapse_meridiem;

    #[test]
    fn collapses_shared_suffix() {
        assert_eq!(collapse_meridiem("2:00 PM", "3:30 PM"), "2:00");
    }

    #[test]
    fn keeps_differing_suffix() {
        assert_eq!(collapse_meridiem("11:00 AM", "1:00 PM"), "11:00 AM");
    }

    #[test]
    fn ignores_24_hour_clock() {
        assert_eq!(collapse_meridiem("14:00", "15:30"), "14:00");
    }
}
