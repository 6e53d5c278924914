use crate::ingest::error::{FetchError, IngestError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Pm10Error {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to resolve the requested date or time")]
    DateParsing,
}
