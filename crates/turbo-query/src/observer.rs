//! A view's subscription to one query at a time.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use crate::client::{FetchOutcome, QueryClient, QueryEntry, QueryOptions, QueryStatus};
use crate::key::QueryKey;

/// What the view currently sees for its active key.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    /// Key the result belongs to.
    pub key: Option<QueryKey>,
    /// Data cached for that key.
    pub data: Option<T>,
    /// Status of the entry (`Loading` when nothing is cached).
    pub status: QueryStatus,
    /// Whether a fetch for that key is running.
    pub is_fetching: bool,
}

impl<T> QueryResult<T> {
    /// Check whether data is absent or still loading.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.status == QueryStatus::Loading
    }
}

/// Binds a view to the query key it currently depends on.
///
/// When the key changes, results fetched under the old key stay in the
/// client's cache but are no longer visible through this observer.
#[derive(Debug)]
pub struct QueryObserver<T> {
    client: QueryClient<T>,
    active: Mutex<Option<QueryKey>>,
}

impl<T: Clone> QueryObserver<T> {
    /// Create an observer with no active key.
    pub fn new(client: QueryClient<T>) -> Self {
        Self {
            client,
            active: Mutex::new(None),
        }
    }

    fn active(&self) -> MutexGuard<'_, Option<QueryKey>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Switch to a new key. Returns `true` if the key changed.
    pub fn set_query(&self, key: QueryKey) -> bool {
        let mut active = self.active();
        let changed = active.as_ref() != Some(&key);
        *active = Some(key);
        changed
    }

    /// The key currently observed.
    pub fn current_key(&self) -> Option<QueryKey> {
        self.active().clone()
    }

    /// Check whether `key` is still the observed key.
    pub fn is_current(&self, key: &QueryKey) -> bool {
        self.active().as_ref() == Some(key)
    }

    /// Fetch `key` on behalf of the view.
    ///
    /// The caller builds the fetcher from the same inputs that produced `key`,
    /// so the result is always cached under the key it answers. If the view
    /// switched to another key meanwhile, `superseded` is `true` and the
    /// result is not visible through [`QueryObserver::result`].
    pub async fn fetch<F, Fut, E>(
        &self,
        key: &QueryKey,
        options: &QueryOptions,
        fetcher: F,
    ) -> ObservedFetch
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let outcome = self.client.fetch(key, options, fetcher).await;
        let superseded = !self.is_current(key);
        if superseded {
            tracing::debug!(%key, "discarding result for superseded key");
        }
        ObservedFetch {
            outcome,
            superseded,
        }
    }

    /// Read the result for the active key.
    pub fn result(&self) -> QueryResult<T> {
        let key = self.current_key();
        let entry: Option<QueryEntry<T>> = key.as_ref().and_then(|k| self.client.entry(k));
        match entry {
            Some(entry) => QueryResult {
                key,
                data: entry.data,
                status: entry.status,
                is_fetching: entry.is_fetching,
            },
            None => QueryResult {
                key,
                data: None,
                status: QueryStatus::Loading,
                is_fetching: false,
            },
        }
    }

    /// The underlying client.
    pub fn client(&self) -> &QueryClient<T> {
        &self.client
    }
}

/// Outcome of [`QueryObserver::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedFetch {
    /// What the client did.
    pub outcome: FetchOutcome,
    /// Whether the observer moved to another key before the fetch finished.
    pub superseded: bool,
}
