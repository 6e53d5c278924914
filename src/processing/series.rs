//! Pivots measurements into chart rows: one row per instant (or day), one column per
//! selected station.

use crate::filtering::MeasurementFilterExt;
use crate::processing::daily::aggregate_daily_in;
use crate::types::measurement::Measurement;
use crate::types::metric::MetricType;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const RAW_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";
const DAILY_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub timestamp: DateTime<Utc>,
    /// Human-readable x-axis label in local time.
    pub label: String,
    /// Metric value per station. A station without a record for this row is absent.
    pub values: BTreeMap<String, Option<f64>>,
}

/// Builds chart rows for `selected` stations, labelled in local time.
///
/// See [`chart_series_in`].
pub fn chart_series<S: AsRef<str>>(
    measurements: &[Measurement],
    selected: &[S],
    daily: bool,
    metric: MetricType,
) -> Vec<ChartRow> {
    chart_series_in(measurements, selected, daily, metric, &Local)
}

/// Builds chart rows for `selected` stations with days and labels taken in `tz`.
///
/// Nothing is plotted without a selection, so an empty `selected` yields no rows. In
/// raw mode there is one row per distinct timestamp and a later duplicate measurement
/// of the same station overwrites an earlier one. In daily mode the rows hold the
/// daily averages of the metric. Rows are ordered by time.
pub fn chart_series_in<S: AsRef<str>, Tz: TimeZone>(
    measurements: &[Measurement],
    selected: &[S],
    daily: bool,
    metric: MetricType,
    tz: &Tz,
) -> Vec<ChartRow>
where
    Tz::Offset: std::fmt::Display,
{
    if selected.is_empty() {
        return Vec::new();
    }
    let subset = measurements.filter_stations(selected);

    let mut rows: BTreeMap<DateTime<Utc>, BTreeMap<String, Option<f64>>> = BTreeMap::new();
    let label_format = if daily {
        for day in aggregate_daily_in(&subset, tz) {
            let value = metric.of_daily(&day);
            rows.entry(day.date).or_default().insert(day.station_name, value);
        }
        DAILY_LABEL_FORMAT
    } else {
        for m in &subset {
            rows.entry(m.timestamp)
                .or_default()
                .insert(m.station_name.clone(), metric.of_measurement(m));
        }
        RAW_LABEL_FORMAT
    };

    rows.into_iter()
        .map(|(timestamp, values)| ChartRow {
            timestamp,
            label: timestamp.with_timezone(tz).format(label_format).to_string(),
            values,
        })
        .collect()
}
