mod air_quality;
mod dataset;
mod error;
mod filtering;
mod ingest;
mod playback;
mod processing;
mod time_matching;
mod types;
mod utils;

pub use air_quality::*;
pub use dataset::*;
pub use error::Pm10Error;
pub use filtering::*;
pub use playback::*;

pub use processing::daily::*;
pub use processing::join::*;
pub use processing::series::*;
pub use processing::statistics::*;

pub use time_matching::historical::*;
pub use time_matching::prediction::*;
pub use time_matching::timeline::*;

pub use types::aggregates::*;
pub use types::any_datetime::{parse_instant, AnyDateTime, StartEndDateTime};
pub use types::date_range::DateRange;
pub use types::measurement::Measurement;
pub use types::metric::{MetricType, Pm10Level};
pub use types::prediction::Prediction;
pub use types::snapshot::*;
pub use types::station::Station;

pub use ingest::cache::{CacheState, DataSource, FetchCache, FetchStatus};
pub use ingest::csv::*;
pub use ingest::remote::{download, RemoteCsv, DEFAULT_PREDICTIONS_URL, DEFAULT_STATIONS_URL};

pub use ingest::error::{FetchError, IngestError};
