//! In-memory cache in front of a data source.
//!
//! The cache holds at most one loaded value. While a load is in flight the previously
//! displayed data stays available, and a failed load replaces it with an empty value.

use crate::ingest::error::FetchError;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Something that can produce a fresh value on demand, such as a remote CSV export.
pub trait DataSource: Send + Sync {
    /// The loaded value. Its default is what consumers see after a failed load.
    type Output: Default + Send + Sync;

    /// Short description for log messages.
    fn describe(&self) -> String;

    fn load(&self) -> impl Future<Output = Result<Self::Output, FetchError>> + Send;
}

#[derive(Debug)]
pub enum CacheState<T> {
    Empty,
    Loading,
    Loaded {
        data: Arc<T>,
        fetched_at: DateTime<Utc>,
    },
    /// The last load failed with this message.
    Errored(String),
}

impl<T> Clone for CacheState<T> {
    fn clone(&self) -> Self {
        match self {
            CacheState::Empty => CacheState::Empty,
            CacheState::Loading => CacheState::Loading,
            CacheState::Loaded { data, fetched_at } => CacheState::Loaded {
                data: Arc::clone(data),
                fetched_at: *fetched_at,
            },
            CacheState::Errored(message) => CacheState::Errored(message.clone()),
        }
    }
}

/// What a consumer of the cache gets to see.
#[derive(Debug)]
pub struct FetchStatus<T> {
    /// The displayed data: the last successful load, or empty after an error.
    pub data: Arc<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_fetched: Option<DateTime<Utc>>,
}

impl<T> Clone for FetchStatus<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            is_loading: self.is_loading,
            error: self.error.clone(),
            last_fetched: self.last_fetched,
        }
    }
}

struct Inner<T> {
    state: CacheState<T>,
    cached: Option<(Arc<T>, DateTime<Utc>)>,
    displayed: Arc<T>,
    last_fetched: Option<DateTime<Utc>>,
    /// Bumped by every load that starts and by every invalidation. A load only
    /// publishes its result if the generation is still the one it started with.
    generation: u64,
}

impl<T> Inner<T> {
    fn status(&self) -> FetchStatus<T> {
        FetchStatus {
            data: Arc::clone(&self.displayed),
            is_loading: matches!(self.state, CacheState::Loading),
            error: match &self.state {
                CacheState::Errored(message) => Some(message.clone()),
                _ => None,
            },
            last_fetched: self.last_fetched,
        }
    }
}

pub struct FetchCache<S: DataSource> {
    source: S,
    inner: Mutex<Inner<S::Output>>,
}

impl<S: DataSource> FetchCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state: CacheState::Empty,
                cached: None,
                displayed: Arc::new(S::Output::default()),
                last_fetched: None,
                generation: 0,
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn state(&self) -> CacheState<S::Output> {
        self.inner.lock().await.state.clone()
    }

    pub async fn status(&self) -> FetchStatus<S::Output> {
        self.inner.lock().await.status()
    }

    /// Serves the cached value if there is one, otherwise loads from the source.
    pub async fn fetch(&self) -> FetchStatus<S::Output> {
        self.run(false).await
    }

    /// Loads again after a failed attempt. Without a preceding failure this behaves
    /// like [`FetchCache::fetch`].
    pub async fn retry(&self) -> FetchStatus<S::Output> {
        let errored = matches!(self.inner.lock().await.state, CacheState::Errored(_));
        self.run(errored).await
    }

    /// Drops the cached value and loads from the source. A load that was already in
    /// flight is abandoned and its result is ignored.
    pub async fn refresh(&self) -> FetchStatus<S::Output> {
        {
            let mut inner = self.inner.lock().await;
            inner.cached = None;
            inner.generation += 1;
        }
        info!("Cache invalidated for {}", self.source.describe());
        self.run(true).await
    }

    async fn run(&self, bypass_cache: bool) -> FetchStatus<S::Output> {
        // Fast path under the lock: serve from the cache.
        let generation = {
            let mut inner = self.inner.lock().await;
            if !bypass_cache {
                if let Some((data, fetched_at)) = inner.cached.clone() {
                    debug!("Cache hit for {}", self.source.describe());
                    inner.displayed = Arc::clone(&data);
                    inner.state = CacheState::Loaded { data, fetched_at };
                    return inner.status();
                }
            }
            inner.generation += 1;
            inner.state = CacheState::Loading;
            inner.generation
        };

        // Slow path: load without holding the lock.
        let result = self.source.load().await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!("Discarding superseded load of {}", self.source.describe());
            return inner.status();
        }
        match result {
            Ok(data) => {
                let data = Arc::new(data);
                let fetched_at = Utc::now();
                inner.cached = Some((Arc::clone(&data), fetched_at));
                inner.displayed = Arc::clone(&data);
                inner.last_fetched = Some(fetched_at);
                inner.state = CacheState::Loaded { data, fetched_at };
            }
            Err(e) => {
                warn!("Failed to load {}: {}", self.source.describe(), e);
                inner.displayed = Arc::new(S::Output::default());
                inner.state = CacheState::Errored(e.to_string());
            }
        }
        inner.status()
    }
}
