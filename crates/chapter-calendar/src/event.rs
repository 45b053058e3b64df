//! Event records and their validation at the store boundary.
//!
//! Rows come out of the event store loosely typed: `isAllDay` may be null,
//! instants are strings in whatever layout the database driver chose, and
//! optional text fields may be blank. [`EventRow::validate`] turns a row into
//! a strict [`Event`] once, so nothing downstream re-checks fields.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::civil;
use crate::error::{CalendarError, Result};
use crate::grid::FetchWindow;

/// A validated calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_all_day: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_by: String,
}

/// An event row as the store serializes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRow {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_all_day: Option<bool>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub created_by: String,
}

impl EventRow {
    /// Validate this row into an [`Event`].
    ///
    /// Offset-less instants are read as wall time in `tz`. A missing
    /// `isAllDay` means a timed event. Blank description/location become `None`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEvent` for a blank title or an
    /// unparseable start/end instant.
    pub fn validate(self, tz: Tz) -> Result<Event> {
        let id = self.id;
        let invalid = |reason: String| CalendarError::InvalidEvent { id, reason };

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(invalid("title is required".to_string()));
        }

        let start_time = civil::parse_instant(&self.start_time, tz)
            .ok_or_else(|| invalid(format!("invalid startTime '{}'", self.start_time)))?;
        let end_time = civil::parse_instant(&self.end_time, tz)
            .ok_or_else(|| invalid(format!("invalid endTime '{}'", self.end_time)))?;

        Ok(Event {
            id,
            title,
            description: non_blank(self.description),
            location: non_blank(self.location),
            is_all_day: self.is_all_day.unwrap_or(false),
            start_time,
            end_time,
            created_by: self.created_by,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a JSON array of store rows and validate every row.
///
/// # Errors
/// Returns `CalendarError::Json` if the document is not an array of rows, or
/// the first `CalendarError::InvalidEvent` encountered.
pub fn parse_events_json(json: &str, tz: Tz) -> Result<Vec<Event>> {
    let rows: Vec<EventRow> = serde_json::from_str(json)?;
    rows.into_iter().map(|row| row.validate(tz)).collect()
}

/// The events whose start falls inside `window`, ordered by start time.
///
/// This is the query the store answers for a grid; it is exposed so callers
/// holding an unfiltered list get identical results.
pub fn filter_window(events: &[Event], window: &FetchWindow) -> Vec<Event> {
    let mut selected: Vec<Event> = events
        .iter()
        .filter(|e| window.contains(e.start_time))
        .cloned()
        .collect();
    selected.sort_by_key(|e| e.start_time);
    selected
}
