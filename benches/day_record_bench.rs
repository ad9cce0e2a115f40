use std::time::Duration;

use chrono::{FixedOffset, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use panchangam::{compute_day_record, CalendarSystem, EphemerisManager, Location, NoOpObserver};

fn day_record_benchmark(c: &mut Criterion) {
    let manager = EphemerisManager::new(256, Duration::from_secs(60));
    let observer = NoOpObserver;
    let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
    let zone = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let location = Location::new(13.08, 80.27).unwrap();

    c.bench_function("compute_day_record_cold_cache", |b| {
        b.iter(|| {
            let manager = EphemerisManager::new(256, Duration::from_secs(60));
            black_box(compute_day_record(
                date,
                zone,
                location,
                CalendarSystem::Purnimanta,
                &manager,
                &observer,
            ))
        })
    });

    // Warm the cache once, then measure repeated lookups for the same day.
    let _ = compute_day_record(date, zone, location, CalendarSystem::Purnimanta, &manager, &observer);
    c.bench_function("compute_day_record_warm_cache", |b| {
        b.iter(|| {
            black_box(compute_day_record(
                date,
                zone,
                location,
                CalendarSystem::Purnimanta,
                &manager,
                &observer,
            ))
        })
    });
}

criterion_group!(benches, day_record_benchmark);
criterion_main!(benches);
