use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed reading from a station at a point in time.
///
/// Every sensor field is optional: `None` means the sensor produced no reading, which
/// is never the same as a reading of zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Capture time of the reading.
    pub timestamp: DateTime<Utc>,
    /// Name of the reporting station. It does not have to match a known [`crate::Station`].
    pub station_name: String,
    /// PM10 concentration in µg/m³.
    pub pm10: Option<f64>,
    /// Precipitation in mm.
    pub precipitation: Option<f64>,
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    pub wind_direction_deg: Option<f64>,
}

impl Measurement {
    /// Creates a measurement with no sensor readings.
    pub fn new(timestamp: DateTime<Utc>, station_name: impl Into<String>) -> Self {
        Self {
            timestamp,
            station_name: station_name.into(),
            pm10: None,
            precipitation: None,
            temperature: None,
            wind_speed: None,
            wind_direction_deg: None,
        }
    }

    pub fn with_pm10(mut self, pm10: f64) -> Self {
        self.pm10 = Some(pm10);
        self
    }

    pub fn with_precipitation(mut self, precipitation: f64) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_wind(mut self, speed: f64, direction_deg: f64) -> Self {
        self.wind_speed = Some(speed);
        self.wind_direction_deg = Some(direction_deg);
        self
    }
}
