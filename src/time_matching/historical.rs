use crate::types::measurement::Measurement;
use crate::types::snapshot::StationSnapshot;
use crate::types::station::{station_index, Station};
use crate::utils::group_by_station;
use chrono::{DateTime, TimeDelta, Utc};

/// Largest distance between a requested instant and a measurement that still counts
/// as a match, in milliseconds.
pub const MEASUREMENT_TOLERANCE_MS: i64 = 15 * 60 * 1000;

/// Nearest-measurement matching within a tolerance window.
///
/// Among the measurements within the tolerance (inclusive) of the requested instant,
/// the closest one wins. When two are equally close the earlier one wins, and of two
/// measurements with the same timestamp the first in input order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceMatch {
    tolerance: TimeDelta,
}

impl Default for ToleranceMatch {
    fn default() -> Self {
        Self::new(TimeDelta::milliseconds(MEASUREMENT_TOLERANCE_MS))
    }
}

impl ToleranceMatch {
    pub fn new(tolerance: TimeDelta) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> TimeDelta {
        self.tolerance
    }

    /// The best match for `target` among `candidates`, if any is within tolerance.
    pub fn closest<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a Measurement>,
        target: DateTime<Utc>,
    ) -> Option<&'a Measurement> {
        let mut best: Option<(TimeDelta, &Measurement)> = None;
        for m in candidates {
            let distance = (m.timestamp - target).abs();
            if distance > self.tolerance {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_distance, best_m)) => {
                    (distance, m.timestamp) < (best_distance, best_m.timestamp)
                }
            };
            if better {
                best = Some((distance, m));
            }
        }
        best.map(|(_, m)| m)
    }

    /// Snapshot of every measured station at `target`.
    ///
    /// Names without a station record are skipped. A station with no measurement
    /// within tolerance gets an all-`None` snapshot stamped with `target`. Snapshots
    /// follow the order in which station names first appear in `measurements`.
    pub fn stations_at_time(
        &self,
        measurements: &[Measurement],
        stations: &[Station],
        target: DateTime<Utc>,
    ) -> Vec<StationSnapshot> {
        let index = station_index(stations);
        group_by_station(measurements)
            .into_iter()
            .filter_map(|(name, group)| {
                let station = index.get(name)?;
                let matched = self.closest(group, target);
                Some(snapshot(station, matched, target))
            })
            .collect()
    }
}

/// [`ToleranceMatch::stations_at_time`] with the default 15 minute tolerance.
pub fn stations_at_time(
    measurements: &[Measurement],
    stations: &[Station],
    target: DateTime<Utc>,
) -> Vec<StationSnapshot> {
    ToleranceMatch::default().stations_at_time(measurements, stations, target)
}

fn snapshot(station: &Station, matched: Option<&Measurement>, target: DateTime<Utc>) -> StationSnapshot {
    StationSnapshot {
        city: station.city.clone(),
        latitude: station.latitude,
        longitude: station.longitude,
        pm10: matched.and_then(|m| m.pm10),
        temperature: matched.and_then(|m| m.temperature),
        precipitation: matched.and_then(|m| m.precipitation),
        wind_speed: matched.and_then(|m| m.wind_speed),
        wind_direction_deg: matched.and_then(|m| m.wind_direction_deg),
        timestamp: matched.map_or(target, |m| m.timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn stations() -> Vec<Station> {
        vec![Station::new("A", 46.0, 14.5)]
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let measurements = vec![Measurement::new(t0(), "A").with_pm10(42.0)];

        let at_edge = stations_at_time(&measurements, &stations(), t0() + TimeDelta::minutes(15));
        assert_eq!(at_edge[0].pm10, Some(42.0));
        assert_eq!(at_edge[0].timestamp, t0());

        let past_edge = t0() + TimeDelta::minutes(15) + TimeDelta::milliseconds(1);
        let outside = stations_at_time(&measurements, &stations(), past_edge);
        assert_eq!(outside.len(), 1);
        assert_eq!(outside[0].pm10, None);
        assert!(!outside[0].has_readings());
        assert_eq!(outside[0].timestamp, past_edge);
    }

    #[test]
    fn test_equidistant_tie_prefers_earlier() {
        let measurements = vec![
            Measurement::new(t0() + TimeDelta::minutes(5), "A").with_pm10(2.0),
            Measurement::new(t0() - TimeDelta::minutes(5), "A").with_pm10(1.0),
        ];

        let snap = &stations_at_time(&measurements, &stations(), t0())[0];

        assert_eq!(snap.pm10, Some(1.0));
        assert_eq!(snap.timestamp, t0() - TimeDelta::minutes(5));
    }

    #[test]
    fn test_identical_timestamps_prefer_first_in_input() {
        let measurements = vec![
            Measurement::new(t0(), "A").with_pm10(7.0),
            Measurement::new(t0(), "A").with_pm10(8.0),
        ];

        let snap = &stations_at_time(&measurements, &stations(), t0())[0];

        assert_eq!(snap.pm10, Some(7.0));
    }

    #[test]
    fn test_closest_wins_and_copies_all_fields() {
        let measurements = vec![
            Measurement::new(t0() - TimeDelta::minutes(10), "A").with_pm10(1.0),
            Measurement::new(t0() + TimeDelta::minutes(2), "A")
                .with_pm10(3.0)
                .with_temperature(-1.0)
                .with_precipitation(0.4)
                .with_wind(2.0, 90.0),
        ];

        let snap = &stations_at_time(&measurements, &stations(), t0())[0];

        assert_eq!(snap.pm10, Some(3.0));
        assert_eq!(snap.temperature, Some(-1.0));
        assert_eq!(snap.precipitation, Some(0.4));
        assert_eq!(snap.wind_speed, Some(2.0));
        assert_eq!(snap.wind_direction_deg, Some(90.0));
        assert_eq!(snap.latitude, 46.0);
        assert_eq!(snap.longitude, 14.5);
    }

    #[test]
    fn test_unknown_station_is_skipped() {
        let measurements = vec![
            Measurement::new(t0(), "Nowhere").with_pm10(1.0),
            Measurement::new(t0(), "A").with_pm10(2.0),
        ];

        let snaps = stations_at_time(&measurements, &stations(), t0());

        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].city, "A");
    }

    #[test]
    fn test_snapshot_between_half_hourly_readings() {
        let ten = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let measurements = vec![
            Measurement::new(ten, "A").with_pm10(30.0),
            Measurement::new(ten + TimeDelta::minutes(30), "A").with_pm10(60.0),
        ];

        let snaps = stations_at_time(&measurements, &stations(), ten + TimeDelta::minutes(5));

        assert_eq!(snaps[0].pm10, Some(30.0));
        assert_eq!(snaps[0].timestamp, ten);
    }

    #[test]
    fn test_matched_measurement_without_values_has_no_readings() {
        let measurements = vec![Measurement::new(t0() + TimeDelta::minutes(3), "A")];

        let snap = &stations_at_time(&measurements, &stations(), t0())[0];

        assert!(!snap.has_readings());
        assert_eq!(snap.timestamp, t0() + TimeDelta::minutes(3));

        let with_wind = vec![Measurement::new(t0(), "A").with_wind(1.5, 180.0)];
        assert!(stations_at_time(&with_wind, &stations(), t0())[0].has_readings());
    }

    #[test]
    fn test_custom_tolerance() {
        let strategy = ToleranceMatch::new(TimeDelta::minutes(1));
        let measurements = vec![Measurement::new(t0(), "A").with_pm10(5.0)];

        let snaps = strategy.stations_at_time(&measurements, &stations(), t0() + TimeDelta::minutes(2));

        assert_eq!(snaps[0].pm10, None);
        assert_eq!(ToleranceMatch::default().tolerance(), TimeDelta::minutes(15));
    }
}
