//! Joins measurements with the station list by station name.

use crate::types::aggregates::StationWithData;
use crate::types::measurement::Measurement;
use crate::types::station::{station_index, Station};
use crate::utils::{group_by_station, mean};
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of [`join`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResult {
    /// One entry per measured station that exists in the station list.
    pub joined: Vec<StationWithData>,
    /// Measured station names with no matching station, in first-appearance order.
    pub unmatched: Vec<String>,
}

/// Attaches every measured station's readings to its station record.
///
/// Only stations with at least one measurement are emitted. `latest_pm10` is taken
/// from the measurement with the greatest timestamp among those with a PM10 reading,
/// so the result does not depend on the input being sorted. Ties on the timestamp go
/// to the measurement that comes later in the input.
pub fn join(measurements: &[Measurement], stations: &[Station]) -> JoinResult {
    let index = station_index(stations);
    let mut result = JoinResult::default();

    for (name, group) in group_by_station(measurements) {
        let Some(station) = index.get(name) else {
            result.unmatched.push(name.to_string());
            continue;
        };

        let latest_pm10 = group
            .iter()
            .filter(|m| m.pm10.is_some())
            .max_by_key(|m| m.timestamp)
            .and_then(|m| m.pm10);
        let average_pm10 = mean(group.iter().map(|m| m.pm10));

        result.joined.push(StationWithData {
            station: (*station).clone(),
            measurements: group.into_iter().cloned().collect(),
            latest_pm10,
            average_pm10,
        });
    }

    if !result.unmatched.is_empty() {
        debug!(
            "{} measured station name(s) have no station record: {:?}",
            result.unmatched.len(),
            result.unmatched
        );
    }
    result
}
