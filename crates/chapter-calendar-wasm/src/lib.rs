//! WASM bindings for chapter-calendar.
//!
//! Exposes date-range labels, month grids, month layouts and day keys to the
//! portal's web UI via `wasm-bindgen`. Complex values cross the boundary as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p chapter-calendar-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/chapter_calendar_wasm.wasm
//! ```

use chapter_calendar::civil;
use chapter_calendar::error::Result;
use chapter_calendar::event::filter_window;
use chapter_calendar::{
    build_month_grid, format_date_range, layout_month, parse_events_json, CalendarConfig,
    CalendarError, ChronoFormatter, Clock, FixedClock, FormatOptions, SystemClock, TimeFormat,
    YearDisplay,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Options for `formatDateRange`, all optional.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct FormatOptionsInput {
    all_day: bool,
    timezone: Option<String>,
    include_weekday: Option<bool>,
    include_year: YearDisplay,
    include_location: Option<String>,
    time_format: TimeFormat,
    locale: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_js(err: CalendarError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn clock_at(now: Option<&str>, tz: Tz) -> Result<Box<dyn Clock>> {
    match now {
        Some(raw) => Ok(Box::new(FixedClock(civil::require_instant(raw, tz)?))),
        None => Ok(Box::new(SystemClock)),
    }
}

/// `today` as `YYYY-MM-DD`, or the system clock's civil day in `tz`.
fn today_or_system(today: Option<&str>, tz: Tz) -> Result<NaiveDate> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| CalendarError::InvalidInstant(raw.to_string())),
        None => Ok(SystemClock.today(tz)),
    }
}

fn format_range_json(start: &str, end: &str, options_json: &str, now: Option<&str>) -> Result<String> {
    let input: FormatOptionsInput = if options_json.trim().is_empty() {
        FormatOptionsInput::default()
    } else {
        serde_json::from_str(options_json)?
    };
    let timezone = match input.timezone.as_deref() {
        Some(name) => civil::parse_timezone(name)?,
        None => chrono_tz::UTC,
    };
    let formatter = match input.locale.as_deref() {
        Some(locale) => ChronoFormatter::new(locale)?,
        None => ChronoFormatter::en_us(),
    };
    let opts = FormatOptions {
        all_day: input.all_day,
        timezone,
        include_weekday: input.include_weekday.unwrap_or(true),
        include_year: input.include_year,
        include_location: input.include_location,
        time_format: input.time_format,
    };
    let clock = clock_at(now, timezone)?;
    Ok(format_date_range(start, end, &opts, &formatter, clock.as_ref()))
}

fn month_grid_json(month: &str, timezone: &str, today: Option<&str>) -> Result<String> {
    let tz = civil::parse_timezone(timezone)?;
    let reference = civil::parse_month(month)?;
    let grid = build_month_grid(reference, tz, today_or_system(today, tz)?);
    Ok(serde_json::to_string(&grid)?)
}

fn layout_month_json(
    month: &str,
    events_json: &str,
    config_json: Option<&str>,
    today: Option<&str>,
) -> Result<String> {
    let config = match config_json {
        Some(raw) if !raw.trim().is_empty() => CalendarConfig::from_json_str(raw)?,
        _ => CalendarConfig::default(),
    };
    let tz = config.timezone;
    let grid = build_month_grid(civil::parse_month(month)?, tz, today_or_system(today, tz)?);
    let events = parse_events_json(events_json, tz)?;
    let visible = filter_window(&events, &grid.window);
    Ok(serde_json::to_string(&layout_month(&visible, &grid, &config))?)
}

fn day_key_of(instant: &str, timezone: &str) -> Result<String> {
    let tz = civil::parse_timezone(timezone)?;
    Ok(civil::day_key(civil::require_instant(instant, tz)?, tz))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Render an event's start/end pair as a display label.
///
/// Unparseable instants produce the label `"Invalid date"`, not an error.
///
/// # Arguments
/// - `start`, `end` -- ISO 8601 strings; offset-less values are wall time in the display zone
/// - `options_json` -- `{allDay, timezone, includeWeekday, includeYear, includeLocation, timeFormat, locale}`, all optional
/// - `now` -- Optional RFC 3339 instant used as "now" when deciding whether to show the year
#[wasm_bindgen(js_name = "formatDateRange")]
pub fn format_date_range_js(
    start: &str,
    end: &str,
    options_json: &str,
    now: Option<String>,
) -> std::result::Result<String, JsValue> {
    format_range_json(start, end, options_json, now.as_deref()).map_err(to_js)
}

/// Build the 6×7 grid for a `YYYY-MM` month.
///
/// Returns JSON with `firstOfMonth`, `weeks[].cells[]` and the fetch window
/// (`from`, `to`) as RFC 3339 instants.
#[wasm_bindgen(js_name = "buildMonthGrid")]
pub fn build_month_grid_js(
    month: &str,
    timezone: &str,
    today: Option<String>,
) -> std::result::Result<String, JsValue> {
    month_grid_json(month, timezone, today.as_deref()).map_err(to_js)
}

/// Lay out a month of events (a JSON array of store rows).
///
/// `config_json` takes the same keys as the TOML configuration file.
#[wasm_bindgen(js_name = "layoutMonth")]
pub fn layout_month_js(
    month: &str,
    events_json: &str,
    config_json: Option<String>,
    today: Option<String>,
) -> std::result::Result<String, JsValue> {
    layout_month_json(month, events_json, config_json.as_deref(), today.as_deref()).map_err(to_js)
}

/// The `YYYY-MM-DD` key of the day `instant` falls on in `timezone`.
#[wasm_bindgen(js_name = "dayKey")]
pub fn day_key_js(instant: &str, timezone: &str) -> std::result::Result<String, JsValue> {
    day_key_of(instant, timezone).map_err(to_js)
}
