use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forecast PM10 value for a station at a forecast instant.
///
/// Predictions come from a model-generated grid and carry no weather fields.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Station name the forecast is for.
    pub city: String,
    /// Forecast instant.
    pub datetime: DateTime<Utc>,
    /// Predicted PM10 concentration in µg/m³.
    pub pm10_pred: Option<f64>,
}

impl Prediction {
    pub fn new(city: impl Into<String>, datetime: DateTime<Utc>, pm10_pred: Option<f64>) -> Self {
        Self {
            city: city.into(),
            datetime,
            pm10_pred,
        }
    }
}
