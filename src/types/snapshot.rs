use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed values of one station resolved at a requested instant.
///
/// When no measurement lies close enough to the requested instant every reading is
/// `None` and `timestamp` is the requested instant itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm10: Option<f64>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    /// Capture time of the matched measurement, or the requested instant.
    pub timestamp: DateTime<Utc>,
}

impl StationSnapshot {
    /// Whether any reading is present.
    pub fn has_readings(&self) -> bool {
        self.pm10.is_some()
            || self.temperature.is_some()
            || self.precipitation.is_some()
            || self.wind_speed.is_some()
            || self.wind_direction_deg.is_some()
    }
}

/// Forecast value of one station resolved at a requested instant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationPredictionSnapshot {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub pm10_pred: Option<f64>,
    pub datetime: DateTime<Utc>,
}
