//! Calendar view state -- which month is shown and which event is open.
//!
//! The state is a plain value; [`CalendarView::update`] returns the next
//! state for an action and never mutates in place.

use chrono::{Duration, Months, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::civil::{self, first_of_month};
use crate::clock::{DateParts, Formatter};
use crate::grid::{build_month_grid, MonthGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    /// First day of the displayed month.
    pub cursor_month: NaiveDate,
    pub selected_event: Option<i64>,
    pub modal_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ViewAction {
    /// Jump to the month containing this date.
    Today(NaiveDate),
    PreviousMonth,
    NextMonth,
    OpenEvent(i64),
    /// Hide the details modal. The selection is kept.
    CloseModal,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor_month: first_of_month(today),
            selected_event: None,
            modal_open: false,
        }
    }

    pub fn update(self, action: ViewAction) -> Self {
        match action {
            ViewAction::Today(today) => Self {
                cursor_month: first_of_month(today),
                ..self
            },
            ViewAction::PreviousMonth => Self {
                cursor_month: self
                    .cursor_month
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(self.cursor_month),
                ..self
            },
            ViewAction::NextMonth => Self {
                cursor_month: self
                    .cursor_month
                    .checked_add_months(Months::new(1))
                    .unwrap_or(self.cursor_month),
                ..self
            },
            ViewAction::OpenEvent(id) => Self {
                selected_event: Some(id),
                modal_open: true,
                ..self
            },
            ViewAction::CloseModal => Self {
                modal_open: false,
                ..self
            },
        }
    }

    /// Grid for the displayed month.
    pub fn grid(&self, tz: Tz, today: NaiveDate) -> MonthGrid {
        build_month_grid(self.cursor_month, tz, today)
    }

    /// Toolbar label, e.g. `"September 2025"`.
    pub fn month_label(&self, formatter: &dyn Formatter, tz: Tz) -> String {
        // Noon keeps the label on the cursor month in every zone.
        let noon = self.cursor_month.and_time(NaiveTime::MIN) + Duration::hours(12);
        formatter.format_parts(civil::resolve_local(noon, tz), tz, DateParts::MonthYear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ChronoFormatter;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn navigation_lands_on_first_of_month() {
        let view = CalendarView::new(ymd(2025, 1, 31));
        assert_eq!(view.cursor_month, ymd(2025, 1, 1));
        let view = view.update(ViewAction::NextMonth);
        assert_eq!(view.cursor_month, ymd(2025, 2, 1));
        let view = view.update(ViewAction::PreviousMonth).update(ViewAction::PreviousMonth);
        assert_eq!(view.cursor_month, ymd(2024, 12, 1));
        let view = view.update(ViewAction::Today(ymd(2025, 9, 8)));
        assert_eq!(view.cursor_month, ymd(2025, 9, 1));
    }

    #[test]
    fn modal_open_and_close() {
        let view = CalendarView::new(ymd(2025, 9, 8)).update(ViewAction::OpenEvent(42));
        assert!(view.modal_open);
        assert_eq!(view.selected_event, Some(42));
        let view = view.update(ViewAction::CloseModal);
        assert!(!view.modal_open);
        assert_eq!(view.selected_event, Some(42));
    }

    #[test]
    fn label_names_the_month() {
        let view = CalendarView::new(ymd(2025, 9, 8));
        let label = view.month_label(&ChronoFormatter::en_us(), chrono_tz::Pacific::Kiritimati);
        assert_eq!(label, "September 2025");
    }
}
