//! Tests for event bucketing, per-day slices and the upcoming list.

use chapter_calendar::event::filter_window;
use chapter_calendar::upcoming::{upcoming_events, upcoming_window, MAX_UPCOMING_DAYS};
use chapter_calendar::{
    all_day_by_day, assign_lanes, bucket_events, build_month_grid, parse_events_json, Bar, Event,
    MonthGrid,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Chicago;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn event(id: i64, title: &str, all_day: bool, start: &str, end: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        description: None,
        location: None,
        is_all_day: all_day,
        start_time: at(start),
        end_time: at(end),
        created_by: "m-1".to_string(),
    }
}

fn september() -> MonthGrid {
    build_month_grid(
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        Chicago,
        NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
    )
}

// ── Classification ──────────────────────────────────────────────────────────

#[test]
fn splits_all_day_from_timed() {
    let events = vec![
        event(1, "Meeting", false, "2025-09-10T23:00:00Z", "2025-09-11T00:30:00Z"),
        event(2, "Retreat", true, "2025-09-12T12:00:00Z", "2025-09-13T12:00:00Z"),
    ];
    let buckets = bucket_events(&events, &september(), Chicago);

    assert_eq!(buckets.timed_by_day.len(), 1);
    assert_eq!(buckets.timed_by_day["2025-09-10"][0].id, 1);
    assert_eq!(buckets.all_day_by_week.len(), 6);
    let bars: Vec<&Bar> = buckets.all_day_by_week.iter().flatten().collect();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].event_id, 2);
}

#[test]
fn timed_event_keyed_by_local_start_day() {
    // 10 PM Chicago on the 10th is already the 11th in UTC.
    let events = vec![event(1, "Dinner", false, "2025-09-11T03:00:00Z", "2025-09-11T04:00:00Z")];
    let chicago = bucket_events(&events, &september(), Chicago);
    let utc = bucket_events(&events, &september(), chrono_tz::UTC);
    assert!(chicago.timed_by_day.contains_key("2025-09-10"));
    assert!(utc.timed_by_day.contains_key("2025-09-11"));
}

#[test]
fn empty_input_gives_empty_groups() {
    let buckets = bucket_events(&[], &september(), Chicago);
    assert!(buckets.timed_by_day.is_empty());
    assert_eq!(buckets.all_day_by_week.len(), 6);
    assert!(buckets.all_day_by_week.iter().all(Vec::is_empty));
}

// ── All-day bars ────────────────────────────────────────────────────────────

#[test]
fn multi_week_event_splits_into_clipped_bars() {
    // Fri Sep 12 .. Tue Sep 23 touches three rows.
    let events = vec![event(9, "Drive", true, "2025-09-12T12:00:00Z", "2025-09-23T12:00:00Z")];
    let buckets = bucket_events(&events, &september(), Chicago);
    let week = |i: usize| buckets.all_day_by_week[i].clone();

    assert_eq!(week(1), vec![Bar { event_id: 9, start_column: 5, span: 2 }]);
    assert_eq!(week(2), vec![Bar { event_id: 9, start_column: 0, span: 7 }]);
    assert_eq!(week(3), vec![Bar { event_id: 9, start_column: 0, span: 3 }]);
    assert!(week(0).is_empty());
    assert!(week(4).is_empty());
}

#[test]
fn event_extending_past_grid_is_clipped() {
    let events = vec![event(3, "Season", true, "2025-08-01T12:00:00Z", "2025-12-01T12:00:00Z")];
    let buckets = bucket_events(&events, &september(), Chicago);
    for week in &buckets.all_day_by_week {
        assert_eq!(week, &vec![Bar { event_id: 3, start_column: 0, span: 7 }]);
    }
}

#[test]
fn inverted_all_day_event_gets_one_column() {
    // End before start still yields a bar in the week holding both days.
    let events = vec![event(4, "Typo", true, "2025-09-11T12:00:00Z", "2025-09-09T12:00:00Z")];
    let buckets = bucket_events(&events, &september(), Chicago);
    assert_eq!(
        buckets.all_day_by_week[1],
        vec![Bar { event_id: 4, start_column: 4, span: 1 }]
    );
}

#[test]
fn week_bars_pack_into_lanes() {
    let events = vec![
        event(1, "A", true, "2025-09-08T12:00:00Z", "2025-09-10T12:00:00Z"),
        event(2, "B", true, "2025-09-09T12:00:00Z", "2025-09-09T12:00:00Z"),
        event(3, "C", true, "2025-09-11T12:00:00Z", "2025-09-12T12:00:00Z"),
    ];
    let buckets = bucket_events(&events, &september(), Chicago);
    let placed = assign_lanes(&buckets.all_day_by_week[1]);
    let lane_of = |id| placed.iter().find(|b| b.bar.event_id == id).unwrap().lane;
    assert_eq!(lane_of(1), 0);
    assert_eq!(lane_of(2), 1);
    assert_eq!(lane_of(3), 0);
}

// ── Per-day slices ──────────────────────────────────────────────────────────

#[test]
fn slices_mark_start_and_end_and_sort_by_title() {
    let events = vec![
        event(1, "zoning vote", true, "2025-09-09T12:00:00Z", "2025-09-09T12:00:00Z"),
        event(2, "Blood Drive", true, "2025-09-08T12:00:00Z", "2025-09-10T12:00:00Z"),
    ];
    let by_day = all_day_by_day(&events, &september(), Chicago);

    let monday = &by_day["2025-09-08"];
    assert_eq!(monday.len(), 1);
    assert!(monday[0].is_start && !monday[0].is_end);

    let tuesday = &by_day["2025-09-09"];
    let titles: Vec<&str> = tuesday.iter().map(|s| s.event.title.as_str()).collect();
    assert_eq!(titles, vec!["Blood Drive", "zoning vote"]);
    assert!(!tuesday[0].is_start && !tuesday[0].is_end);
    assert!(tuesday[1].is_start && tuesday[1].is_end);

    assert!(by_day["2025-09-10"][0].is_end);
    assert!(!by_day.contains_key("2025-09-11"));
}

#[test]
fn slices_clamp_to_grid() {
    let events = vec![event(1, "Season", true, "2025-08-01T12:00:00Z", "2025-12-01T12:00:00Z")];
    let by_day = all_day_by_day(&events, &september(), Chicago);
    assert_eq!(by_day.len(), 42);
    assert!(by_day.values().flatten().all(|s| !s.is_start && !s.is_end));
}

// ── Store boundary ──────────────────────────────────────────────────────────

#[test]
fn rows_from_store_json() {
    let json = r#"[
        {"id": 1, "title": "Chapter Meeting", "description": null, "location": "Lodge",
         "isAllDay": null, "startTime": "2025-09-10 19:00:00", "endTime": "2025-09-10 21:00:00",
         "createdBy": "m-100"},
        {"id": 2, "title": "Fall Cleanup", "isAllDay": true,
         "startTime": "2025-09-13", "endTime": "2025-09-14"}
    ]"#;
    let events = parse_events_json(json, Chicago).unwrap();
    assert_eq!(events.len(), 2);
    assert!(!events[0].is_all_day);
    assert_eq!(events[0].start_time, Utc.with_ymd_and_hms(2025, 9, 11, 0, 0, 0).unwrap());
    assert!(events[1].is_all_day);
    assert_eq!(events[1].created_by, "");
}

#[test]
fn invalid_row_fails_whole_document() {
    let json = r#"[{"id": 5, "title": "", "startTime": "2025-09-10", "endTime": "2025-09-10"}]"#;
    assert!(parse_events_json(json, Chicago).is_err());
}

#[test]
fn window_filter_is_half_open_on_start() {
    let grid = september();
    let events = vec![
        event(1, "Late", false, "2025-10-12T04:59:00Z", "2025-10-12T06:00:00Z"),
        event(2, "Too late", false, "2025-10-12T05:00:00Z", "2025-10-12T06:00:00Z"),
        event(3, "Edge", false, "2025-08-31T05:00:00Z", "2025-08-31T06:00:00Z"),
        event(4, "Too early", false, "2025-08-31T04:59:59Z", "2025-08-31T06:00:00Z"),
    ];
    let ids: Vec<i64> = filter_window(&events, &grid.window).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

// ── Upcoming ────────────────────────────────────────────────────────────────

#[test]
fn upcoming_starts_at_local_midnight_and_limits() {
    let now = at("2025-09-08T20:00:00Z"); // 3 PM in Chicago
    let events: Vec<Event> = (0..10)
        .map(|i| {
            let start = Utc.with_ymd_and_hms(2025, 9, 8 + i, 14, 0, 0).unwrap();
            Event {
                start_time: start,
                end_time: start,
                ..event(i64::from(i), "E", false, "2025-09-08T00:00:00Z", "2025-09-08T00:00:00Z")
            }
        })
        .rev()
        .collect();

    let upcoming = upcoming_events(&events, now, Chicago, 30, 6);
    let ids: Vec<i64> = upcoming.iter().map(|e| e.id).collect();
    // This morning's event (id 0) is still listed.
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);

    let window = upcoming_window(now, Chicago, 30);
    assert_eq!(window.from, at("2025-09-08T05:00:00Z"));
    assert_eq!(window.to, at("2025-10-08T05:00:00Z"));
}

#[test]
fn upcoming_excludes_past_and_far_future() {
    let now = at("2025-09-08T20:00:00Z");
    let events = vec![
        event(1, "Yesterday", false, "2025-09-07T15:00:00Z", "2025-09-07T16:00:00Z"),
        event(2, "Next quarter", false, "2025-12-01T15:00:00Z", "2025-12-01T16:00:00Z"),
    ];
    assert!(upcoming_events(&events, now, Chicago, 30, 6).is_empty());
}

#[test]
fn upcoming_look_ahead_is_capped() {
    let now = at("2025-09-08T20:00:00Z");
    let capped = upcoming_window(now, Chicago, MAX_UPCOMING_DAYS);
    assert_eq!(upcoming_window(now, Chicago, 200_000_000), capped);
    assert_eq!(upcoming_window(now, Chicago, i64::MAX), capped);
    assert!(capped.to > capped.from);

    let events = vec![event(1, "Later", false, "2030-01-01T15:00:00Z", "2030-01-01T16:00:00Z")];
    assert_eq!(upcoming_events(&events, now, Chicago, i64::MAX, 6).len(), 1);
}

#[test]
fn non_positive_look_ahead_is_empty() {
    let now = at("2025-09-08T20:00:00Z");
    let window = upcoming_window(now, Chicago, i64::MIN);
    assert_eq!(window.from, window.to);
    let events = vec![event(1, "Tonight", false, "2025-09-08T23:00:00Z", "2025-09-09T00:00:00Z")];
    assert!(upcoming_events(&events, now, Chicago, 0, 6).is_empty());
}
