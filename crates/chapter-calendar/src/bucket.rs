//! Event bucketing -- grouping a month's events the way the grid draws them.
//!
//! Timed events are grouped under the day key of their start. All-day events
//! become one [`Bar`] per week they touch, clipped to that week; a span
//! crossing Saturday→Sunday produces two independent bars.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::Serialize;

use crate::civil::{self, civil_day, days_between};
use crate::event::Event;
use crate::grid::{MonthGrid, WeekRow, DAYS_PER_WEEK};
use crate::lanes::Bar;

/// Timed events shown in a day cell before the rest collapse into "+N more".
pub const DEFAULT_MAX_TIMED_PER_DAY: usize = 2;

/// Events of one month grid, grouped for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBuckets<'a> {
    /// Timed events by `YYYY-MM-DD` of their start, each list sorted by start.
    pub timed_by_day: BTreeMap<String, Vec<&'a Event>>,
    /// Unplaced all-day bars, one list per grid week.
    pub all_day_by_week: Vec<Vec<Bar>>,
}

/// Split `events` into timed groups and per-week all-day bars.
pub fn bucket_events<'a>(events: &'a [Event], grid: &MonthGrid, tz: Tz) -> EventBuckets<'a> {
    let (all_day, timed): (Vec<&Event>, Vec<&Event>) =
        events.iter().partition(|e| e.is_all_day);

    let timed_by_day = group_timed(&timed, tz);
    let all_day_by_week: Vec<Vec<Bar>> = grid
        .weeks
        .iter()
        .map(|week| week_bars(&all_day, week, tz))
        .collect();

    tracing::debug!(
        timed = timed.len(),
        all_day = all_day.len(),
        days = timed_by_day.len(),
        bars = all_day_by_week.iter().map(Vec::len).sum::<usize>(),
        "bucketed events"
    );

    EventBuckets {
        timed_by_day,
        all_day_by_week,
    }
}

fn group_timed<'a>(timed: &[&'a Event], tz: Tz) -> BTreeMap<String, Vec<&'a Event>> {
    let mut by_day: BTreeMap<String, Vec<&'a Event>> = BTreeMap::new();
    for &event in timed {
        by_day
            .entry(civil::day_key(event.start_time, tz))
            .or_default()
            .push(event);
    }
    for day in by_day.values_mut() {
        day.sort_by_key(|e| e.start_time);
    }
    by_day
}

/// Bars for the all-day events overlapping `week`.
///
/// Overlap is decided on civil days: `start_day <= week_end && end_day >= week_start`.
/// An event whose end precedes its start still gets a one-column bar.
pub fn week_bars(all_day: &[&Event], week: &WeekRow, tz: Tz) -> Vec<Bar> {
    let (week_start, week_end) = (week.start(), week.end());
    let last_column = DAYS_PER_WEEK as i64 - 1;

    all_day
        .iter()
        .filter_map(|event| {
            let start_day = civil_day(event.start_time, tz);
            let end_day = civil_day(event.end_time, tz);
            if start_day > week_end || end_day < week_start {
                return None;
            }
            let start_column = days_between(week_start, start_day).max(0);
            let end_column = days_between(week_start, end_day).min(last_column);
            let span = (end_column - start_column + 1).max(1);
            Some(Bar {
                event_id: event.id,
                start_column: start_column as usize,
                span: span as usize,
            })
        })
        .collect()
}

/// What a day cell shows of its timed events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAgenda<'a> {
    pub shown: Vec<&'a Event>,
    /// Events hidden behind the "+N more" label.
    pub overflow: usize,
}

impl DayAgenda<'_> {
    /// `"+N more"` when events were hidden.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

/// Cap a day's (already sorted) events at `max_shown`.
pub fn day_agenda<'a>(events: &[&'a Event], max_shown: usize) -> DayAgenda<'a> {
    let shown: Vec<&'a Event> = events.iter().take(max_shown).copied().collect();
    DayAgenda {
        overflow: events.len() - shown.len(),
        shown,
    }
}

/// One day's piece of an all-day event, as drawn inside a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllDaySlice<'a> {
    pub event: &'a Event,
    /// This day is the event's first civil day.
    pub is_start: bool,
    /// This day is the event's last civil day.
    pub is_end: bool,
}

/// All-day events expanded into per-day slices, clamped to the grid.
///
/// Each day's slices are ordered by title, case-insensitively.
pub fn all_day_by_day<'a>(
    events: &'a [Event],
    grid: &MonthGrid,
    tz: Tz,
) -> BTreeMap<String, Vec<AllDaySlice<'a>>> {
    let (first, last) = (grid.first_day(), grid.last_day());
    let mut by_day: BTreeMap<String, Vec<AllDaySlice<'a>>> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_all_day) {
        let event_start = civil_day(event.start_time, tz);
        let event_end = civil_day(event.end_time, tz);
        let from = event_start.max(first);
        let to = event_end.min(last);

        for day in from.iter_days().take_while(|day| *day <= to) {
            by_day
                .entry(civil::date_key(day))
                .or_default()
                .push(AllDaySlice {
                    event,
                    is_start: day == event_start,
                    is_end: day == event_end,
                });
        }
    }

    for slices in by_day.values_mut() {
        slices.sort_by(|a, b| {
            a.event
                .title
                .to_lowercase()
                .cmp(&b.event.title.to_lowercase())
                .then_with(|| a.event.title.cmp(&b.event.title))
        });
    }
    by_day
}
