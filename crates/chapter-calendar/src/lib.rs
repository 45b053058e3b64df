//! # chapter-calendar
//!
//! Month-view calendar computations for the chapter portal.
//!
//! Everything here is a pure function of its inputs: given a reference date,
//! a display timezone and the events the store returned for the grid's fetch
//! window, the crate produces the 6×7 grid, per-day groupings, lane-packed
//! all-day bars and human-readable date-range labels. Fetching, persistence
//! and rendering belong to the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use chapter_calendar::{build_month_grid, format_date_range, ChronoFormatter, FixedClock, FormatOptions};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let tz = chrono_tz::America::Chicago;
//! let grid = build_month_grid(NaiveDate::from_ymd_opt(2025, 9, 17).unwrap(), tz, NaiveDate::MIN);
//! assert_eq!(grid.first_day(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
//!
//! let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
//! let opts = FormatOptions { timezone: tz, ..FormatOptions::default() };
//! let label = format_date_range(
//!     "2025-09-08T14:00:00Z",
//!     "2025-09-08T15:30:00Z",
//!     &opts,
//!     &ChronoFormatter::en_us(),
//!     &clock,
//! );
//! assert_eq!(label, "Mon, Sep 8 · 9:00–10:30 AM");
//! ```
//!
//! ## Modules
//!
//! - [`civil`]: civil days, day keys, instant parsing, start-of-day
//! - [`clock`]: injected `Clock` and locale-aware `Formatter`
//! - [`format`]: start/end → display label
//! - [`grid`]: 42-cell month grid and its fetch window
//! - [`event`]: strict `Event` schema, store-row validation
//! - [`bucket`]: timed-by-day and all-day-by-week grouping
//! - [`lanes`]: greedy lane assignment for all-day bars
//! - [`layout`]: all of the above combined for one month
//! - [`upcoming`]: the upcoming-events list
//! - [`view`]: month navigation and selection state
//! - [`config`]: TOML configuration
//! - [`error`]: error types

pub mod bucket;
pub mod civil;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod lanes;
pub mod layout;
pub mod upcoming;
pub mod view;

pub use bucket::{all_day_by_day, bucket_events, day_agenda, EventBuckets};
pub use civil::{civil_day, day_key, parse_instant, parse_timezone};
pub use clock::{ChronoFormatter, Clock, FixedClock, Formatter, SystemClock, TimeFormat};
pub use config::CalendarConfig;
pub use error::CalendarError;
pub use event::{parse_events_json, Event, EventRow};
pub use format::{format_date_range, format_instant_range, FormatOptions, YearDisplay, INVALID_DATE};
pub use grid::{build_month_grid, CalendarCell, FetchWindow, MonthGrid, WeekRow};
pub use lanes::{assign_lanes, assign_lanes_with, Bar, LaneBar, LaneTieBreak};
pub use layout::{layout_month, MonthLayout};
pub use upcoming::upcoming_events;
pub use view::{CalendarView, ViewAction};
