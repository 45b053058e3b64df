//! Month grid -- the fixed 6×7 layout a month view renders.
//!
//! The grid always starts on the Sunday on or before the 1st and always has
//! 42 cells, so months that need only four or five rows are padded with days
//! from the following month. The fetch window covers every visible cell.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::civil;

pub const WEEKS_PER_GRID: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
pub const CELLS_PER_GRID: usize = WEEKS_PER_GRID * DAYS_PER_WEEK;

// A grid plus its closing midnight spans at most 48 days past the 1st.
const REPRESENTABLE_MARGIN_DAYS: u64 = 62;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A single day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// The day belongs to the displayed month.
    pub in_month: bool,
    pub is_today: bool,
}

/// One row of the grid, Sunday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub cells: [CalendarCell; DAYS_PER_WEEK],
}

impl WeekRow {
    /// The Sunday that opens the row.
    pub fn start(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// The Saturday that closes the row.
    pub fn end(&self) -> NaiveDate {
        self.cells[DAYS_PER_WEEK - 1].date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }
}

/// Half-open `[from, to)` window of instants, applied to event start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl FetchWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }
}

/// The 42-cell grid for one month plus the window of events it can show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub first_of_month: NaiveDate,
    pub weeks: [WeekRow; WEEKS_PER_GRID],
    #[serde(flatten)]
    pub window: FetchWindow,
}

impl MonthGrid {
    /// First visible day (always a Sunday).
    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0].start()
    }

    /// Last visible day (always a Saturday).
    pub fn last_day(&self) -> NaiveDate {
        self.weeks[WEEKS_PER_GRID - 1].end()
    }

    /// All 42 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|week| week.cells.iter())
    }
}

/// Build the month grid for the month containing `reference`.
///
/// `today` marks the cell flagged `is_today`; pass a date outside the grid to
/// flag nothing. Fetch-window boundaries are start-of-day instants in `tz`.
///
/// References within two months of `NaiveDate::MIN` or `NaiveDate::MAX` are
/// pulled inward so every cell stays representable.
pub fn build_month_grid(reference: NaiveDate, tz: Tz, today: NaiveDate) -> MonthGrid {
    let margin = Days::new(REPRESENTABLE_MARGIN_DAYS);
    let lowest = NaiveDate::MIN.checked_add_days(margin).unwrap_or(NaiveDate::MIN);
    let highest = NaiveDate::MAX.checked_sub_days(margin).unwrap_or(NaiveDate::MAX);
    let first_of_month = civil::first_of_month(reference.clamp(lowest, highest));
    let offset = first_of_month.weekday().num_days_from_sunday();
    let first_cell = first_of_month - Duration::days(i64::from(offset));

    let weeks = std::array::from_fn(|row| WeekRow {
        cells: std::array::from_fn(|column| {
            let date = first_cell + Duration::days((row * DAYS_PER_WEEK + column) as i64);
            CalendarCell {
                date,
                in_month: date.year() == first_of_month.year()
                    && date.month() == first_of_month.month(),
                is_today: date == today,
            }
        }),
    });

    let last_cell = first_cell + Duration::days(CELLS_PER_GRID as i64 - 1);
    let window = FetchWindow {
        from: civil::start_of_day(first_cell, tz),
        to: civil::start_of_day(last_cell + Duration::days(1), tz),
    };

    tracing::debug!(
        month = %first_of_month.format("%Y-%m"),
        first_cell = %first_cell,
        last_cell = %last_cell,
        "built month grid"
    );

    MonthGrid {
        first_of_month,
        weeks,
        window,
    }
}
