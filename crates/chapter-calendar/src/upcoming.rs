//! The "Upcoming Events" list shown beside the calendar.

use chrono::{DateTime, Days, Utc};
use chrono_tz::Tz;

use crate::civil;
use crate::event::Event;
use crate::grid::FetchWindow;

/// Longest look-ahead honoured, in days (about ten years).
pub const MAX_UPCOMING_DAYS: i64 = 3_660;

/// `[today 00:00, today + days 00:00)` in `tz`.
///
/// `days` is clamped to `0..=MAX_UPCOMING_DAYS`; zero or negative gives an
/// empty window.
pub fn upcoming_window(now: DateTime<Utc>, tz: Tz, days: i64) -> FetchWindow {
    let today = civil::civil_day(now, tz);
    let span = days.clamp(0, MAX_UPCOMING_DAYS) as u64;
    let last = today.checked_add_days(Days::new(span)).unwrap_or(today);
    FetchWindow {
        from: civil::start_of_day(today, tz),
        to: civil::start_of_day(last, tz),
    }
}

/// The first `limit` events starting within the next `days` days, soonest first.
///
/// Events earlier today are included; the window opens at local midnight.
pub fn upcoming_events(
    events: &[Event],
    now: DateTime<Utc>,
    tz: Tz,
    days: i64,
    limit: usize,
) -> Vec<&Event> {
    let window = upcoming_window(now, tz, days);
    let mut selected: Vec<&Event> = events
        .iter()
        .filter(|e| window.contains(e.start_time))
        .collect();
    selected.sort_by_key(|e| e.start_time);
    selected.truncate(limit);
    selected
}
