use crate::ingest::cache::DataSource;
use crate::ingest::csv::{parse_csv_async, CsvRecord};
use crate::ingest::error::FetchError;
use async_compression::tokio::bufread::GzipDecoder;
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use std::marker::PhantomData;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::StreamReader;

pub const DEFAULT_STATIONS_URL: &str =
    "https://raw.githubusercontent.com/LukaVolk/IOI_projekt/refs/heads/main/data/stations_data.csv";
pub const DEFAULT_PREDICTIONS_URL: &str =
    "https://raw.githubusercontent.com/LukaVolk/IOI_projekt/refs/heads/main/data/predictions.csv";

/// Downloads `url` into memory. A `.gz` URL is decompressed while streaming.
pub async fn download(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    info!("Downloading data from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(match e.status() {
                Some(status) => FetchError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                },
                None => FetchError::NetworkRequest(url.to_string(), e),
            });
        }
    };

    let stream = response
        .bytes_stream()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
    let reader = StreamReader::new(stream);

    let bytes = if url.ends_with(".gz") {
        read_all(GzipDecoder::new(reader)).await?
    } else {
        read_all(reader).await?
    };
    info!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(bytes)
}

async fn read_all(reader: impl AsyncRead + Unpin) -> Result<Vec<u8>, FetchError> {
    let mut reader = reader;
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// A CSV export published at a URL, parsed into records of type `R`.
pub struct RemoteCsv<R> {
    url: String,
    client: Client,
    _record: PhantomData<fn() -> R>,
}

impl<R: CsvRecord> RemoteCsv<R> {
    pub fn new(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
            _record: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<R: CsvRecord + Sync> DataSource for RemoteCsv<R> {
    type Output = Vec<R>;

    fn describe(&self) -> String {
        format!("{} data from {}", R::KIND, self.url)
    }

    async fn load(&self) -> Result<Vec<R>, FetchError> {
        let bytes = download(&self.client, &self.url).await?;
        let records = parse_csv_async::<R>(bytes).await?;
        if records.is_empty() {
            return Err(FetchError::NoValidData {
                kind: R::KIND,
                url: self.url.clone(),
            });
        }
        Ok(records)
    }
}
