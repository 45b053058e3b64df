//! Month layout -- everything a month view draws, in one structure.
//!
//! Combines the grid, bucketing, lane packing and the per-day agenda cap so a
//! presentation layer (the web UI through the WASM bindings, or the CLI) can
//! render a month without repeating any date logic.

use chrono::NaiveDate;
use serde::Serialize;

use crate::bucket::{self, AllDaySlice};
use crate::civil;
use crate::config::CalendarConfig;
use crate::event::Event;
use crate::grid::MonthGrid;
use crate::lanes::{self, LaneBar};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub key: String,
    pub in_month: bool,
    pub is_today: bool,
    /// All-day events covering this day, by title.
    pub all_day: Vec<AllDaySlice<'a>>,
    /// Timed events shown in the cell, by start.
    pub timed: Vec<&'a Event>,
    /// Timed events hidden behind the overflow label.
    pub overflow: usize,
    pub overflow_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLayout<'a> {
    pub days: Vec<DayLayout<'a>>,
    /// All-day bars with lanes, in placement order.
    pub bars: Vec<LaneBar>,
    pub lane_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthLayout<'a> {
    pub grid: &'a MonthGrid,
    pub weeks: Vec<WeekLayout<'a>>,
}

/// Lay out `events` on `grid` using the display settings in `config`.
///
/// `events` should already be restricted to the grid's fetch window; events
/// outside it simply find no cell.
pub fn layout_month<'a>(
    events: &'a [Event],
    grid: &'a MonthGrid,
    config: &CalendarConfig,
) -> MonthLayout<'a> {
    let tz = config.timezone;
    let buckets = bucket::bucket_events(events, grid, tz);
    let slices = bucket::all_day_by_day(events, grid, tz);

    let weeks: Vec<WeekLayout<'a>> = grid
        .weeks
        .iter()
        .zip(buckets.all_day_by_week)
        .map(|(week, week_bars)| {
            let bars = lanes::assign_lanes_with(&week_bars, config.lane_tie_break);
            let lane_count = lanes::lane_count(&bars);
            let days = week
                .cells
                .iter()
                .map(|cell| {
                    let key = civil::date_key(cell.date);
                    let timed = buckets
                        .timed_by_day
                        .get(&key)
                        .map(|day| bucket::day_agenda(day, config.max_timed_per_day))
                        .unwrap_or_else(|| bucket::day_agenda(&[], config.max_timed_per_day));
                    DayLayout {
                        date: cell.date,
                        in_month: cell.in_month,
                        is_today: cell.is_today,
                        all_day: slices.get(&key).cloned().unwrap_or_default(),
                        overflow_label: timed.overflow_label(),
                        overflow: timed.overflow,
                        timed: timed.shown,
                        key,
                    }
                })
                .collect();
            WeekLayout {
                days,
                bars,
                lane_count,
            }
        })
        .collect();

    tracing::debug!(
        month = %grid.first_of_month.format("%Y-%m"),
        events = events.len(),
        max_lanes = weeks.iter().map(|w| w.lane_count).max().unwrap_or(0),
        "laid out month"
    );

    MonthLayout { grid, weeks }
}
