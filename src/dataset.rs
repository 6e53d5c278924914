//! Loaded measurements and stations, and the derived views a dashboard needs for
//! one combination of date range, station selection and aggregation mode.

use crate::error::Pm10Error;
use crate::filtering::{filter_measurements, MeasurementFilterExt};
use crate::ingest::csv::{load_measurements, load_stations};
use crate::processing::join::{join, JoinResult};
use crate::processing::statistics::statistics;
use crate::types::aggregates::Statistics;
use crate::types::date_range::DateRange;
use crate::types::measurement::Measurement;
use crate::types::station::Station;
use bon::bon;
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
}

/// Everything derived from a [`Dataset`] for one set of filter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetView {
    /// Measurements inside the date range that belong to the selected stations.
    pub filtered: Vec<Measurement>,
    /// Stations joined with their in-range measurements. The station selection does
    /// not apply here, so unselected stations stay on the map.
    pub join: JoinResult,
    /// Statistics over `filtered`.
    pub statistics: Statistics,
}

#[bon]
impl Dataset {
    pub fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            measurements,
            stations,
        }
    }

    /// Loads a measurement export and a station list from CSV files.
    ///
    /// # Errors
    ///
    /// Returns [`Pm10Error::Ingest`] if either file cannot be read or parsed.
    pub async fn load(
        measurements_path: impl AsRef<Path>,
        stations_path: impl AsRef<Path>,
    ) -> Result<Self, Pm10Error> {
        let (measurements, stations) = tokio::try_join!(
            load_measurements(measurements_path),
            load_stations(stations_path)
        )?;
        debug!(
            "Loaded dataset with {} measurements and {} stations",
            measurements.len(),
            stations.len()
        );
        Ok(Self::new(measurements, stations))
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Every station name that occurs in the measurements, sorted and deduplicated.
    pub fn station_names(&self) -> Vec<String> {
        self.measurements
            .iter()
            .map(|m| m.station_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Earliest and latest measurement timestamp, `None` without measurements.
    pub fn date_extent(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let min = self.measurements.iter().map(|m| m.timestamp).min()?;
        let max = self.measurements.iter().map(|m| m.timestamp).max()?;
        Some((min, max))
    }

    /// Builds the filtered collection, join result and statistics.
    ///
    /// Unset `from`/`to` leave that side of the date range open, an empty `stations`
    /// selects every station, and `daily` computes statistics over daily averages.
    #[builder]
    pub fn view(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        #[builder(default)] stations: Vec<String>,
        #[builder(default)] daily: bool,
    ) -> DatasetView {
        let range = DateRange::new(from, to);
        let filtered = filter_measurements(&self.measurements, &range, &stations);

        let joined = if self.measurements.is_empty() || self.stations.is_empty() {
            JoinResult::default()
        } else {
            join(&self.measurements.filter_date_range(&range), &self.stations)
        };

        DatasetView {
            statistics: statistics(&filtered, daily),
            filtered,
            join: joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Measurement::new(t(10, 0), "A").with_pm10(30.0),
                Measurement::new(t(11, 0), "A").with_pm10(60.0),
                Measurement::new(t(9, 0), "B").with_pm10(5.0),
                Measurement::new(t(10, 0), "Unknown").with_pm10(1.0),
            ],
            vec![Station::new("A", 46.0, 14.0), Station::new("B", 45.0, 15.0)],
        )
    }

    #[test]
    fn test_view_end_to_end() {
        let dataset = sample();

        let view = dataset
            .view()
            .from(t(10, 0))
            .stations(vec!["A".to_string()])
            .call();

        assert_eq!(
            view.statistics,
            Statistics {
                exceedance_count: 1,
                max_pm10: Some(60.0),
                mean_pm10: Some(45.0),
                total_measurements: 2,
            }
        );
        // The join ignores the station selection but honours the date range.
        let joined: Vec<&str> = view.join.joined.iter().map(|s| s.station.city.as_str()).collect();
        assert_eq!(joined, vec!["A"]);
        assert_eq!(view.join.unmatched, vec!["Unknown".to_string()]);
        assert_eq!(view.join.joined[0].latest_pm10, Some(60.0));
    }

    #[test]
    fn test_view_defaults_select_everything() {
        let dataset = sample();

        let view = dataset.view().call();

        assert_eq!(view.filtered.len(), 4);
        assert_eq!(view.statistics.total_measurements, 4);
        assert_eq!(view.join.joined.len(), 2);
    }

    #[test]
    fn test_view_without_stations_has_empty_join() {
        let dataset = Dataset::new(sample().measurements, Vec::new());

        let view = dataset.view().maybe_to(Some(t(23, 0))).call();

        assert!(view.join.joined.is_empty());
        assert!(view.join.unmatched.is_empty());
        assert_eq!(view.filtered.len(), 4);
    }

    #[test]
    fn test_station_names_and_extent() {
        let dataset = sample();

        assert_eq!(dataset.station_names(), vec!["A", "B", "Unknown"]);
        assert_eq!(dataset.date_extent(), Some((t(9, 0), t(11, 0))));
        assert_eq!(Dataset::default().date_extent(), None);
    }
}
