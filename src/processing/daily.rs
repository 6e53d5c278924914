use crate::types::aggregates::DailyAggregate;
use crate::types::any_datetime::start_of_day;
use crate::types::measurement::Measurement;
use crate::utils::FieldAccumulator;
use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use std::collections::BTreeMap;

#[derive(Default)]
struct DayBucket {
    pm10: FieldAccumulator,
    precipitation: FieldAccumulator,
    temperature: FieldAccumulator,
    wind_speed: FieldAccumulator,
}

impl DayBucket {
    fn push(&mut self, m: &Measurement) {
        self.pm10.push(m.pm10);
        self.precipitation.push(m.precipitation);
        self.temperature.push(m.temperature);
        self.wind_speed.push(m.wind_speed);
    }

    fn count(&self) -> usize {
        [
            self.pm10.count(),
            self.precipitation.count(),
            self.temperature.count(),
            self.wind_speed.count(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Averages measurements per station and local calendar day.
///
/// See [`aggregate_daily_in`].
pub fn aggregate_daily(measurements: &[Measurement]) -> Vec<DailyAggregate> {
    aggregate_daily_in(measurements, &Local)
}

/// Averages measurements per station and calendar day in `tz`.
///
/// Every field is averaged over its own non-null readings. `count` is the largest of
/// the per-field reading counts, so a day whose measurements carry no readings at all
/// is still emitted, with every field `None` and a count of 0.
///
/// The output is ordered by day, then by station name.
pub fn aggregate_daily_in<Tz: TimeZone>(measurements: &[Measurement], tz: &Tz) -> Vec<DailyAggregate> {
    let mut buckets: BTreeMap<(NaiveDate, &str), DayBucket> = BTreeMap::new();
    for m in measurements {
        let day = m.timestamp.with_timezone(tz).date_naive();
        buckets
            .entry((day, m.station_name.as_str()))
            .or_default()
            .push(m);
    }

    buckets
        .into_iter()
        .map(|((day, station_name), bucket)| DailyAggregate {
            // Midnight can fall in a DST gap; the UTC reading of the day is the fallback.
            date: start_of_day(tz, day).unwrap_or_else(|| day.and_time(NaiveTime::MIN).and_utc()),
            day,
            station_name: station_name.to_string(),
            pm10: bucket.pm10.average(),
            precipitation: bucket.precipitation.average(),
            temperature: bucket.temperature.average(),
            wind_speed: bucket.wind_speed.average(),
            count: bucket.count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_partial_fields_average_independently() {
        let measurements = vec![
            Measurement::new(at(1, 8), "A").with_pm10(20.0),
            Measurement::new(at(1, 9), "A").with_precipitation(5.0),
        ];

        let daily = aggregate_daily_in(&measurements, &Utc);

        assert_eq!(daily.len(), 1);
        let d = &daily[0];
        assert_eq!(d.pm10, Some(20.0));
        assert_eq!(d.precipitation, Some(5.0));
        assert_eq!(d.temperature, None);
        assert_eq!(d.wind_speed, None);
        assert_eq!(d.count, 1);
        assert_eq!(d.day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(d.date, at(1, 0));
    }

    #[test]
    fn test_buckets_split_by_station_and_day() {
        let measurements = vec![
            Measurement::new(at(2, 8), "B").with_pm10(10.0),
            Measurement::new(at(1, 8), "B").with_pm10(30.0),
            Measurement::new(at(1, 9), "A").with_pm10(40.0),
            Measurement::new(at(1, 10), "A").with_pm10(60.0),
        ];

        let daily = aggregate_daily_in(&measurements, &Utc);
        let keys: Vec<(u32, &str)> = daily
            .iter()
            .map(|d| (chrono::Datelike::day(&d.day), d.station_name.as_str()))
            .collect();

        assert_eq!(keys, vec![(1, "A"), (1, "B"), (2, "B")]);
        assert_eq!(daily[0].pm10, Some(50.0));
        assert_eq!(daily[0].count, 2);
    }

    #[test]
    fn test_day_boundary_follows_time_zone() {
        // 23:30 UTC on Jan 1st is already Jan 2nd at UTC+1.
        let measurements = vec![Measurement::new(Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap(), "A")
            .with_pm10(12.0)];
        let cet = FixedOffset::east_opt(3600).unwrap();

        let utc_days = aggregate_daily_in(&measurements, &Utc);
        let cet_days = aggregate_daily_in(&measurements, &cet);

        assert_eq!(utc_days[0].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(cet_days[0].day, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(cet_days[0].date, Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_day_without_readings_has_zero_count() {
        let measurements = vec![Measurement::new(at(3, 12), "A")];

        let daily = aggregate_daily_in(&measurements, &Utc);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].count, 0);
        assert_eq!(daily[0].pm10, None);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}
