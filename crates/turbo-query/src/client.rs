//! Keyed query cache with in-flight deduplication.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::dependency::DependencyTag;
use crate::key::QueryKey;

/// Error type for query operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Query is disabled")]
    Disabled,

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Per-query behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Whether the query may run at all.
    pub enabled: bool,
    /// How long a successful result is served without refetching.
    pub stale_time: Duration,
    /// Dependency the query belongs to (for logging).
    pub tag: DependencyTag,
}

impl QueryOptions {
    /// Create options from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        Self {
            enabled: true,
            stale_time: tag.default_stale_time(),
            tag,
        }
    }

    /// Enable or disable the query.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the stale time.
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::from_tag(DependencyTag::Custom("default"))
    }
}

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No data and no fetch has completed yet.
    Loading,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed.
    Error,
}

/// A cached query result.
#[derive(Debug, Clone)]
pub struct QueryEntry<T> {
    /// Last successfully fetched data.
    pub data: Option<T>,
    /// Error from the last fetch, if it failed.
    pub error: Option<QueryError>,
    /// Entry status.
    pub status: QueryStatus,
    /// Whether a fetch for this key is running.
    pub is_fetching: bool,
    /// When data was last stored.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> QueryEntry<T> {
    fn loading() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Loading,
            is_fetching: false,
            updated_at: None,
        }
    }

    /// Check whether the data is recent enough to skip a refetch.
    pub fn is_fresh(&self, stale_time: Duration) -> bool {
        if self.status != QueryStatus::Success {
            return false;
        }
        match self.updated_at {
            // A clock that went backwards reports a negative age; treat as fresh.
            Some(at) => (Utc::now() - at)
                .to_std()
                .map(|age| age < stale_time)
                .unwrap_or(true),
            None => false,
        }
    }
}

/// What a call to [`QueryClient::fetch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The query is disabled; the fetcher was not called.
    Disabled,
    /// Cached data is still fresh; the fetcher was not called.
    Fresh,
    /// Another fetch for the same key is running; the fetcher was not called.
    Deduplicated,
    /// The fetcher ran and its data was stored under the key.
    Fetched,
    /// The fetcher ran and failed; the error was stored under the key.
    Failed(QueryError),
}

#[derive(Debug)]
struct Inner<T> {
    entries: HashMap<QueryKey, QueryEntry<T>>,
    in_flight: HashSet<QueryKey>,
}

/// Shared cache of query results, keyed by [`QueryKey`].
///
/// Results are always stored under the key the fetch was issued for. Readers
/// look up their own current key, so a late response for an old key can never
/// show up under a new one.
#[derive(Debug)]
pub struct QueryClient<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for QueryClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for QueryClient<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                in_flight: HashSet::new(),
            })),
        }
    }
}

impl<T: Clone> QueryClient<T> {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get a snapshot of the entry for a key.
    pub fn entry(&self, key: &QueryKey) -> Option<QueryEntry<T>> {
        self.lock().entries.get(key).cloned()
    }

    /// Get the cached data for a key.
    pub fn data(&self, key: &QueryKey) -> Option<T> {
        self.lock().entries.get(key).and_then(|e| e.data.clone())
    }

    /// Check whether a fetch for the key is running.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().in_flight.contains(key)
    }

    /// Store data under a key directly.
    pub fn set_data(&self, key: QueryKey, data: T) {
        let mut inner = self.lock();
        let entry = inner.entries.entry(key).or_insert_with(QueryEntry::loading);
        entry.data = Some(data);
        entry.error = None;
        entry.status = QueryStatus::Success;
        entry.updated_at = Some(Utc::now());
    }

    /// Run `fetcher` for `key` unless the query is disabled, fresh, or
    /// already in flight.
    ///
    /// No lock is held while the fetcher runs.
    pub async fn fetch<F, Fut, E>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        fetcher: F,
    ) -> FetchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !options.enabled {
            tracing::trace!(%key, tag = %options.tag, "query disabled");
            return FetchOutcome::Disabled;
        }

        let _guard = {
            let mut inner = self.lock();
            if inner
                .entries
                .get(key)
                .is_some_and(|e| e.is_fresh(options.stale_time))
            {
                return FetchOutcome::Fresh;
            }
            if !inner.in_flight.insert(key.clone()) {
                tracing::debug!(%key, "fetch already in flight");
                return FetchOutcome::Deduplicated;
            }
            inner
                .entries
                .entry(key.clone())
                .or_insert_with(QueryEntry::loading)
                .is_fetching = true;
            InFlightGuard {
                client: self,
                key: key.clone(),
            }
        };

        tracing::debug!(%key, tag = %options.tag, "fetching");
        let result = fetcher().await;

        let mut inner = self.lock();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(QueryEntry::loading);
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.status = QueryStatus::Success;
                entry.updated_at = Some(Utc::now());
                FetchOutcome::Fetched
            }
            Err(e) => {
                let error = QueryError::Fetch(e.to_string());
                tracing::warn!(%key, tag = %options.tag, error = %e, "fetch failed");
                entry.error = Some(error.clone());
                entry.status = QueryStatus::Error;
                FetchOutcome::Failed(error)
            }
        }
    }
}

/// Clears the in-flight marker when a fetch finishes or is dropped.
struct InFlightGuard<'a, T> {
    client: &'a QueryClient<T>,
    key: QueryKey,
}

impl<T> Drop for InFlightGuard<'_, T> {
    fn drop(&mut self) {
        let mut inner = self
            .client
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.in_flight.remove(&self.key);
        if let Some(entry) = inner.entries.get_mut(&self.key) {
            entry.is_fetching = false;
        }
    }
}
