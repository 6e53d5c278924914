//! CSV exports into typed records.
//!
//! Every column is read as a string and converted cell by cell, so a malformed value
//! only costs its own row (or field) instead of failing the whole file.

use crate::ingest::error::IngestError;
use crate::types::any_datetime::parse_instant;
use crate::types::measurement::Measurement;
use crate::types::prediction::Prediction;
use crate::types::station::Station;
use log::{debug, warn};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tokio::{fs, task};

/// A record type that can be built from the rows of a CSV export.
pub trait CsvRecord: Sized + Send + 'static {
    /// Name used in log and error messages.
    const KIND: &'static str;

    /// Converts every usable row of `df`. Rows without the key fields are skipped.
    fn from_frame(df: &DataFrame) -> Vec<Self>;
}

impl CsvRecord for Measurement {
    const KIND: &'static str = "measurement";

    fn from_frame(df: &DataFrame) -> Vec<Self> {
        let Some(timestamps) = string_column(df, &["datum_zajema"]) else {
            return Vec::new();
        };
        let station = string_column(df, &["mesto"]);
        let pm10 = string_column(df, &["pm10"]);
        let precipitation = string_column(df, &["padavine"]);
        let temperature = string_column(df, &["temperatura"]);
        let wind_speed = string_column(df, &["veter"]);
        let wind_direction = string_column(df, &["wind_direction"]);

        let mut records: Vec<Measurement> = (0..df.height())
            .filter_map(|idx| {
                let timestamp = timestamps.get(idx).and_then(parse_instant)?;
                Some(Measurement {
                    timestamp,
                    station_name: station
                        .and_then(|c| c.get(idx))
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                    pm10: numeric_cell(pm10, idx),
                    precipitation: numeric_cell(precipitation, idx),
                    temperature: numeric_cell(temperature, idx),
                    wind_speed: numeric_cell(wind_speed, idx),
                    wind_direction_deg: numeric_cell(wind_direction, idx),
                })
            })
            .collect();
        records.sort_by_key(|m| m.timestamp);
        records
    }
}

impl CsvRecord for Station {
    const KIND: &'static str = "station";

    fn from_frame(df: &DataFrame) -> Vec<Self> {
        let (Some(city), Some(longitude), Some(latitude)) = (
            string_column(df, &["city"]),
            string_column(df, &["longitude"]),
            string_column(df, &["latitude"]),
        ) else {
            return Vec::new();
        };

        (0..df.height())
            .filter_map(|idx| {
                let name = city.get(idx).map(str::trim).filter(|s| !s.is_empty())?;
                Some(Station {
                    city: name.to_string(),
                    longitude: numeric_cell(Some(longitude), idx)?,
                    latitude: numeric_cell(Some(latitude), idx)?,
                })
            })
            .collect()
    }
}

impl CsvRecord for Prediction {
    const KIND: &'static str = "prediction";

    fn from_frame(df: &DataFrame) -> Vec<Self> {
        let (Some(cities), Some(datetimes)) = (
            string_column(df, &["city", "mesto"]),
            string_column(df, &["datetime", "datum_zajema"]),
        ) else {
            return Vec::new();
        };
        let pm10_pred = string_column(df, &["pm10_pred"]);

        let mut records: Vec<Prediction> = (0..df.height())
            .filter_map(|idx| {
                let name = cities.get(idx).map(str::trim).filter(|s| !s.is_empty())?;
                let datetime = datetimes.get(idx).and_then(parse_instant)?;
                Some(Prediction {
                    city: name.to_string(),
                    datetime,
                    pm10_pred: numeric_cell(pm10_pred, idx),
                })
            })
            .collect();
        records.sort_by_key(|p| p.datetime);
        records
    }
}

/// Parses a numeric cell. Empty, unparseable and non-finite values are `None`.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The first of `names` that exists in `df`, as a string column.
fn string_column<'a>(df: &'a DataFrame, names: &[&str]) -> Option<&'a StringChunked> {
    names
        .iter()
        .find_map(|name| df.column(name).ok())
        .and_then(|column| column.as_materialized_series().str().ok())
}

fn numeric_cell(column: Option<&StringChunked>, idx: usize) -> Option<f64> {
    column.and_then(|c| c.get(idx)).and_then(parse_numeric)
}

/// Parses CSV bytes (with a header row) into records.
///
/// Input that is empty or only whitespace yields no records rather than an error.
/// Rows with extra fields are truncated to the header. If the file as a whole is
/// rejected (for example over a badly quoted cell), it is read again row by row and
/// only the rejected rows are dropped.
pub fn parse_csv<R: CsvRecord>(bytes: Vec<u8>) -> Result<Vec<R>, IngestError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let df = match read_frame(&bytes) {
        Ok(df) => df,
        Err(e) => {
            warn!("Reading {} CSV row by row after: {}", R::KIND, e);
            read_frame_by_row(&bytes).map_err(|e| IngestError::CsvParse {
                kind: R::KIND,
                source: e,
            })?
        }
    };

    let records = R::from_frame(&df);
    if records.len() < df.height() {
        debug!(
            "Dropped {} of {} {} rows without usable key fields",
            df.height() - records.len(),
            df.height(),
            R::KIND
        );
    }
    Ok(records)
}

fn read_frame(bytes: &[u8]) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_ignore_errors(true)
        .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Reads each data line together with the header and stacks the frames that parse.
fn read_frame_by_row(bytes: &[u8]) -> PolarsResult<DataFrame> {
    let mut lines = bytes
        .split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace));
    let Some(header) = lines.next() else {
        polars_bail!(NoData: "empty CSV");
    };

    let mut chunk = header.to_vec();
    chunk.push(b'\n');
    let mut df = read_frame(&chunk)?;
    let mut dropped = 0;
    for line in lines {
        chunk.truncate(header.len() + 1);
        chunk.extend_from_slice(line);
        chunk.push(b'\n');
        match read_frame(&chunk) {
            Ok(row) => {
                df.vstack_mut(&row)?;
            }
            Err(e) => {
                debug!("Dropping unreadable CSV row: {}", e);
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        warn!("Dropped {} unreadable CSV rows", dropped);
    }
    Ok(df)
}

/// [`parse_csv`] on a blocking worker thread.
pub async fn parse_csv_async<R: CsvRecord>(bytes: Vec<u8>) -> Result<Vec<R>, IngestError> {
    task::spawn_blocking(move || parse_csv::<R>(bytes)).await?
}

/// Reads and parses a CSV file.
pub async fn load_csv_file<R: CsvRecord>(path: impl AsRef<Path>) -> Result<Vec<R>, IngestError> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .map_err(|e| IngestError::FileRead(path.to_path_buf(), e))?;
    let records = parse_csv_async::<R>(bytes).await?;
    debug!("Loaded {} {} records from {:?}", records.len(), R::KIND, path);
    Ok(records)
}

pub async fn load_measurements(path: impl AsRef<Path>) -> Result<Vec<Measurement>, IngestError> {
    load_csv_file(path).await
}

pub async fn load_stations(path: impl AsRef<Path>) -> Result<Vec<Station>, IngestError> {
    load_csv_file(path).await
}

pub async fn load_predictions(path: impl AsRef<Path>) -> Result<Vec<Prediction>, IngestError> {
    load_csv_file(path).await
}
