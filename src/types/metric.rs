//! Metric selection for chart series and PM10 air-quality bands.

use crate::types::aggregates::DailyAggregate;
use crate::types::measurement::Measurement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric field that can be plotted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MetricType {
    #[default]
    Pm10,
    Temperature,
    Precipitation,
    WindSpeed,
}

impl MetricType {
    pub const ALL: [MetricType; 4] = [
        MetricType::Pm10,
        MetricType::Temperature,
        MetricType::Precipitation,
        MetricType::WindSpeed,
    ];

    /// Axis label including the unit.
    pub fn label(&self) -> &'static str {
        match self {
            MetricType::Pm10 => "PM10 (µg/m³)",
            MetricType::Temperature => "Temperature (°C)",
            MetricType::Precipitation => "Precipitation (mm)",
            MetricType::WindSpeed => "Wind (m/s)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::Pm10 => "µg/m³",
            MetricType::Temperature => "°C",
            MetricType::Precipitation => "mm",
            MetricType::WindSpeed => "m/s",
        }
    }

    /// Reads this metric from a raw measurement.
    pub fn of_measurement(&self, measurement: &Measurement) -> Option<f64> {
        match self {
            MetricType::Pm10 => measurement.pm10,
            MetricType::Temperature => measurement.temperature,
            MetricType::Precipitation => measurement.precipitation,
            MetricType::WindSpeed => measurement.wind_speed,
        }
    }

    /// Reads this metric from a daily aggregate.
    pub fn of_daily(&self, aggregate: &DailyAggregate) -> Option<f64> {
        match self {
            MetricType::Pm10 => aggregate.pm10,
            MetricType::Temperature => aggregate.temperature,
            MetricType::Precipitation => aggregate.precipitation,
            MetricType::WindSpeed => aggregate.wind_speed,
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Air-quality band of a PM10 concentration.
///
/// The bands split at 25 and 50 µg/m³; 50 is the daily limit value also used for
/// exceedance counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pm10Level {
    /// No reading available.
    Unknown,
    Good,
    Moderate,
    Bad,
}

impl Pm10Level {
    pub fn classify(pm10: Option<f64>) -> Self {
        match pm10 {
            None => Pm10Level::Unknown,
            Some(v) if v <= 25.0 => Pm10Level::Good,
            Some(v) if v <= 50.0 => Pm10Level::Moderate,
            Some(_) => Pm10Level::Bad,
        }
    }
}
