//! Derived records computed from raw measurements.
//!
//! None of these are patched in place. They are recomputed whenever the measurement
//! or station collections they come from change.

use crate::types::measurement::Measurement;
use crate::types::station::Station;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A station together with the measurements reported under its name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationWithData {
    #[serde(flatten)]
    pub station: Station,
    /// All measurements for this station, in input order.
    pub measurements: Vec<Measurement>,
    /// PM10 of the most recent measurement that has a PM10 reading.
    pub latest_pm10: Option<f64>,
    /// Mean of all PM10 readings, `None` when there are none.
    pub average_pm10: Option<f64>,
}

/// Per-station, per-calendar-day averages.
///
/// Each field is averaged independently over the readings that have it, so a day
/// where one sensor is missing still reports the others.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    /// Start of the calendar day (local midnight) as an instant.
    pub date: DateTime<Utc>,
    /// The calendar day itself.
    pub day: NaiveDate,
    pub station_name: String,
    pub pm10: Option<f64>,
    pub precipitation: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    /// The largest per-field sample count of the day.
    pub count: usize,
}

/// Summary figures for a measurement (or daily aggregate) collection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of PM10 values above the limit value.
    pub exceedance_count: usize,
    #[serde(rename = "maxPM10")]
    pub max_pm10: Option<f64>,
    #[serde(rename = "meanPM10")]
    pub mean_pm10: Option<f64>,
    /// Records considered, including those without a PM10 reading.
    pub total_measurements: usize,
}
