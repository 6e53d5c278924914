//! This module provides the main entry point for working with the published station
//! list and PM10 forecasts. It keeps both in memory behind a fetch cache and resolves
//! map snapshots for a requested instant.

use crate::error::Pm10Error;
use crate::ingest::cache::{FetchCache, FetchStatus};
use crate::ingest::remote::{RemoteCsv, DEFAULT_PREDICTIONS_URL, DEFAULT_STATIONS_URL};
use crate::time_matching::historical::ToleranceMatch;
use crate::time_matching::prediction::ExactMatch;
use crate::time_matching::timeline::unique_prediction_timestamps;
use crate::types::any_datetime::AnyDateTime;
use crate::types::measurement::Measurement;
use crate::types::prediction::Prediction;
use crate::types::snapshot::{StationPredictionSnapshot, StationSnapshot};
use crate::types::station::Station;
use bon::bon;
use chrono::{DateTime, Utc};
use reqwest::Client;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use pm10_timeline::LatLon;
///
/// let ljubljana = LatLon(46.0569, 14.5058);
/// assert_eq!(ljubljana.0, 46.0569); // Latitude
/// assert_eq!(ljubljana.1, 14.5058); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client for the published air-quality data.
///
/// It owns one cache for the station list and one for the predictions. Each cache
/// loads at most once until it is refreshed, keeps showing its last data while a
/// reload is running, and shows an empty collection after a failed load.
///
/// Create an instance with [`AirQuality::builder()`]; every setting is optional.
///
/// # Examples
///
/// ```no_run
/// # use pm10_timeline::{AirQuality, Pm10Error};
/// # async fn run() -> Result<(), Pm10Error> {
/// let client = AirQuality::builder().build();
///
/// let stations = client.stations().await;
/// if let Some(error) = &stations.error {
///     eprintln!("Stations unavailable: {error}");
/// }
///
/// for snapshot in client.predictions_at("2025-01-10 12:00:00").await? {
///     println!("{}: {:?}", snapshot.city, snapshot.pm10_pred);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AirQuality {
    stations: FetchCache<RemoteCsv<Station>>,
    predictions: FetchCache<RemoteCsv<Prediction>>,
}

impl Default for AirQuality {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[bon]
impl AirQuality {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `stations_url` - CSV export of the station list. Defaults to the project's
    ///   published `stations_data.csv`.
    /// * `predictions_url` - CSV export of the forecasts. Defaults to the project's
    ///   published `predictions.csv`.
    /// * `client` - HTTP client to download with. A new one is created if omitted.
    ///
    /// URLs ending in `.gz` are decompressed while downloading.
    #[builder]
    pub fn new(
        #[builder(into)] stations_url: Option<String>,
        #[builder(into)] predictions_url: Option<String>,
        client: Option<Client>,
    ) -> Self {
        let client = client.unwrap_or_default();
        let stations_url = stations_url.unwrap_or_else(|| DEFAULT_STATIONS_URL.to_string());
        let predictions_url =
            predictions_url.unwrap_or_else(|| DEFAULT_PREDICTIONS_URL.to_string());
        Self {
            stations: FetchCache::new(RemoteCsv::new(stations_url, client.clone())),
            predictions: FetchCache::new(RemoteCsv::new(predictions_url, client)),
        }
    }

    pub fn stations_url(&self) -> &str {
        self.stations.source().url()
    }

    pub fn predictions_url(&self) -> &str {
        self.predictions.source().url()
    }

    /// The station list, loaded on first use and cached afterwards.
    pub async fn stations(&self) -> FetchStatus<Vec<Station>> {
        self.stations.fetch().await
    }

    /// Reloads the station list if the last attempt failed.
    pub async fn retry_stations(&self) -> FetchStatus<Vec<Station>> {
        self.stations.retry().await
    }

    /// Drops the cached station list and downloads it again.
    pub async fn refresh_stations(&self) -> FetchStatus<Vec<Station>> {
        self.stations.refresh().await
    }

    /// The current station list state without triggering a load.
    pub async fn stations_status(&self) -> FetchStatus<Vec<Station>> {
        self.stations.status().await
    }

    /// The forecasts, loaded on first use and cached afterwards.
    pub async fn predictions(&self) -> FetchStatus<Vec<Prediction>> {
        self.predictions.fetch().await
    }

    pub async fn retry_predictions(&self) -> FetchStatus<Vec<Prediction>> {
        self.predictions.retry().await
    }

    pub async fn refresh_predictions(&self) -> FetchStatus<Vec<Prediction>> {
        self.predictions.refresh().await
    }

    pub async fn predictions_status(&self) -> FetchStatus<Vec<Prediction>> {
        self.predictions.status().await
    }

    /// Distinct forecast instants, ascending. Empty when no forecasts are available.
    pub async fn prediction_timeline(&self) -> Vec<DateTime<Utc>> {
        unique_prediction_timestamps(&self.predictions().await.data)
    }

    /// Forecast snapshot of every station at `target`.
    ///
    /// `target` must match a forecast instant exactly; see [`ExactMatch`]. A date
    /// without a time resolves to the start of that day.
    ///
    /// # Errors
    ///
    /// Returns [`Pm10Error::DateParsing`] if `target` cannot be resolved. Download
    /// failures are not errors here: the affected collection is simply empty.
    pub async fn predictions_at(
        &self,
        target: impl AnyDateTime,
    ) -> Result<Vec<StationPredictionSnapshot>, Pm10Error> {
        let target = target.get_datetime_range().ok_or(Pm10Error::DateParsing)?.start;
        let (stations, predictions) = tokio::join!(self.stations(), self.predictions());
        Ok(ExactMatch.predictions_at_time(&predictions.data, &stations.data, target))
    }

    /// Snapshot of every station in `measurements` at `target`, resolved against the
    /// cached station list with the default 15 minute [`ToleranceMatch`].
    ///
    /// # Errors
    ///
    /// Returns [`Pm10Error::DateParsing`] if `target` cannot be resolved.
    pub async fn stations_at(
        &self,
        measurements: &[Measurement],
        target: impl AnyDateTime,
    ) -> Result<Vec<StationSnapshot>, Pm10Error> {
        let target = target.get_datetime_range().ok_or(Pm10Error::DateParsing)?.start;
        let stations = self.stations().await;
        Ok(ToleranceMatch::default().stations_at_time(measurements, &stations.data, target))
    }
}
