use crate::types::prediction::Prediction;
use crate::types::snapshot::StationPredictionSnapshot;
use crate::types::station::Station;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Exact-instant matching for forecasts.
///
/// A prediction only matches when its forecast instant equals the requested one;
/// there is no nearest-neighbour fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactMatch;

impl ExactMatch {
    /// One snapshot per station, in station order.
    ///
    /// If several predictions exist for a station at `target` the first one is used.
    /// Stations without one get `pm10_pred: None` and `datetime: target`.
    pub fn predictions_at_time(
        &self,
        predictions: &[Prediction],
        stations: &[Station],
        target: DateTime<Utc>,
    ) -> Vec<StationPredictionSnapshot> {
        let mut at_target: HashMap<&str, &Prediction> = HashMap::new();
        for p in predictions.iter().filter(|p| p.datetime == target) {
            at_target.entry(p.city.as_str()).or_insert(p);
        }

        stations
            .iter()
            .map(|station| {
                let matched = at_target.get(station.city.as_str());
                StationPredictionSnapshot {
                    city: station.city.clone(),
                    latitude: station.latitude,
                    longitude: station.longitude,
                    pm10_pred: matched.and_then(|p| p.pm10_pred),
                    datetime: matched.map_or(target, |p| p.datetime),
                }
            })
            .collect()
    }
}

/// [`ExactMatch::predictions_at_time`].
pub fn predictions_at_time(
    predictions: &[Prediction],
    stations: &[Station],
    target: DateTime<Utc>,
) -> Vec<StationPredictionSnapshot> {
    ExactMatch.predictions_at_time(predictions, stations, target)
}
