use crate::processing::daily::aggregate_daily_in;
use crate::types::aggregates::Statistics;
use crate::types::measurement::Measurement;
use crate::utils::{max, mean};
use chrono::{Local, TimeZone};

/// PM10 daily limit value in µg/m³. Readings strictly above it count as exceedances.
pub const PM10_LIMIT: f64 = 50.0;

/// Summary statistics over raw measurements, or over daily averages when
/// `daily_mode` is set (days are cut in local time).
pub fn statistics(measurements: &[Measurement], daily_mode: bool) -> Statistics {
    statistics_in(measurements, daily_mode, &Local)
}

/// Like [`statistics`], with calendar days taken in `tz`.
pub fn statistics_in<Tz: TimeZone>(measurements: &[Measurement], daily_mode: bool, tz: &Tz) -> Statistics {
    if daily_mode {
        let daily = aggregate_daily_in(measurements, tz);
        summarize(daily.iter().map(|d| d.pm10), daily.len())
    } else {
        summarize(measurements.iter().map(|m| m.pm10), measurements.len())
    }
}

fn summarize(pm10: impl Iterator<Item = Option<f64>> + Clone, total: usize) -> Statistics {
    Statistics {
        exceedance_count: pm10.clone().flatten().filter(|v| *v > PM10_LIMIT).count(),
        max_pm10: max(pm10.clone()),
        mean_pm10: mean(pm10),
        total_measurements: total,
    }
}
