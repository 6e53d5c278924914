//! Defines the monitoring station record and the lookup structure used to
//! resolve measurement and prediction station names against it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fixed air-quality monitoring location.
///
/// Stations are identified by their `city` name. Measurements and predictions refer
/// to a station through that name only, so a station list is a flat collection and
/// relationships are expressed by matching names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// The unique station name (e.g., "Ljubljana Bezigrad").
    pub city: String,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
}

impl Station {
    /// Creates a station from its name and coordinates.
    ///
    /// Coordinates are given latitude first, matching [`crate::LatLon`].
    pub fn new(city: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            city: city.into(),
            longitude,
            latitude,
        }
    }

    /// The station position as a [`crate::LatLon`] pair.
    pub fn location(&self) -> crate::LatLon {
        crate::LatLon(self.latitude, self.longitude)
    }
}

/// Builds a name → station lookup.
///
/// City names are unique keys: when a list contains the same city twice, the later
/// entry replaces the earlier one.
pub(crate) fn station_index(stations: &[Station]) -> HashMap<&str, &Station> {
    let mut index = HashMap::with_capacity(stations.len());
    for station in stations {
        index.insert(station.city.as_str(), station);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_index_later_duplicate_wins() {
        let stations = vec![
            Station::new("Celje", 46.23, 15.26),
            Station::new("Koper", 45.55, 13.73),
            Station::new("Celje", 46.24, 15.27),
        ];

        let index = station_index(&stations);

        assert_eq!(index.len(), 2);
        assert_eq!(index["Celje"].latitude, 46.24);
        assert_eq!(index["Koper"].longitude, 13.73);
    }

    #[test]
    fn test_station_serializes_camel_case() {
        let station = Station::new("Nova Gorica", 45.96, 13.65);
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(json["city"], "Nova Gorica");
        assert_eq!(json["latitude"], 45.96);
        assert_eq!(json["longitude"], 13.65);
    }
}
