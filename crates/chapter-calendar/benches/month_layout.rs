use chapter_calendar::{build_month_grid, layout_month, CalendarConfig, Event};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn busy_month(count: i64) -> Vec<Event> {
    let base = Utc.with_ymd_and_hms(2025, 8, 31, 14, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = base + Duration::hours(i * 7);
            let is_all_day = i % 5 == 0;
            Event {
                id: i,
                title: format!("Event {i}"),
                description: None,
                location: None,
                is_all_day,
                start_time: start,
                end_time: start + Duration::hours(if is_all_day { 24 * (i % 4) } else { 2 }),
                created_by: "m-1".to_string(),
            }
        })
        .collect()
}

pub fn layout(c: &mut Criterion) {
    let config = CalendarConfig::default();
    let reference = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let grid = build_month_grid(reference, config.timezone, reference);

    for count in [10, 100, 500] {
        let events = busy_month(count);
        c.bench_function(&format!("layout_month {count} events"), |b| {
            b.iter(|| layout_month(black_box(&events), black_box(&grid), &config));
        });
    }

    c.bench_function("build_month_grid", |b| {
        b.iter(|| build_month_grid(black_box(reference), config.timezone, reference));
    });
}

criterion_group!(benches, layout);
criterion_main!(benches);
