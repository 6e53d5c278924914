use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read CSV file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Parsing error processing {kind} CSV data")]
    CsvParse {
        kind: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Data download or decompression failed")]
    DownloadIo(#[from] std::io::Error),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("No valid {kind} data found in CSV from {url}")]
    NoValidData { kind: &'static str, url: String },
}
