use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pm10_timeline::{aggregate_daily_in, stations_at_time, Measurement, Station};

const STATION_COUNT: usize = 20;
const HOURS: i64 = 24 * 60;

fn sample_data() -> (Vec<Measurement>, Vec<Station>, DateTime<Utc>) {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let stations: Vec<Station> = (0..STATION_COUNT)
        .map(|i| Station::new(format!("Station {i}"), 46.0 + i as f64 * 0.01, 14.5))
        .collect();
    let measurements = (0..HOURS)
        .flat_map(|h| {
            stations.iter().enumerate().map(move |(i, s)| {
                Measurement::new(start + TimeDelta::hours(h), s.city.clone())
                    .with_pm10(((h + i as i64) % 80) as f64)
                    .with_temperature((h % 24) as f64 - 5.0)
            })
        })
        .collect();
    (measurements, stations, start + TimeDelta::hours(HOURS / 2) + TimeDelta::minutes(7))
}

fn bench_timeline(c: &mut Criterion) {
    let (measurements, stations, target) = sample_data();

    c.bench_function("stations_at_time", |b| {
        b.iter(|| stations_at_time(black_box(&measurements), black_box(&stations), black_box(target)))
    });
    c.bench_function("aggregate_daily", |b| {
        b.iter(|| aggregate_daily_in(black_box(&measurements), &Utc))
    });
}

criterion_group!(benches, bench_timeline);
criterion_main!(benches);
