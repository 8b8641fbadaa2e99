//! Query cache with single-flight fetches and prefix invalidation.
//!
//! Entries hold their value as type-erased JSON so one store serves every
//! resource shape. Each entry owns a watch channel; subscribers observe the
//! loading/ready/error lifecycle, and `ensure` callers attach to an in-flight
//! fetch through the same channel instead of issuing a duplicate request.
//! The entry map lock is never held across an await.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::key::QueryKey;
use crate::domain::{ApiError, ApiResult};

/// Lifecycle phase of one cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No settled result yet; a fetch may be in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed.
    Error,
}

/// Point-in-time view of one cached query, published on its watch channel.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    /// Lifecycle phase.
    pub status: QueryStatus,
    /// Latest successful value; retained while a refetch is in flight.
    pub value: Option<Arc<Value>>,
    /// Latest failure, when `status` is [`QueryStatus::Error`].
    pub error: Option<ApiError>,
    /// Whether the value has been invalidated since it was fetched.
    pub stale: bool,
}

impl QuerySnapshot {
    fn initial() -> Self {
        Self {
            status: QueryStatus::Loading,
            value: None,
            error: None,
            stale: false,
        }
    }

    fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Ready && !self.stale
    }

    /// Decode the held value into a concrete resource shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<ApiResult<T>> {
        self.value
            .as_ref()
            .map(|value| serde_json::from_value(Value::clone(value)).map_err(ApiError::decode))
    }
}

/// Type-erased async fetch function registered per key.
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, ApiResult<Value>> + Send + Sync>;

struct CacheEntry {
    fetcher: Option<Fetcher>,
    tx: watch::Sender<QuerySnapshot>,
    in_flight: bool,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            fetcher: None,
            tx: watch::Sender::new(QuerySnapshot::initial()),
            in_flight: false,
        }
    }
}

/// Shared query cache; always used behind an [`Arc`].
#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

/// Outcome of the locked admission step of `ensure`.
enum Admission {
    Fresh(Arc<Value>),
    Attach(watch::Receiver<QuerySnapshot>),
    Fetch(Fetcher),
}

impl QueryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, fetching when absent or stale.
    ///
    /// Registers `fetch` as the key's fetcher so later invalidations can
    /// refetch in the background. Concurrent calls for one key share a
    /// single fetch: the first caller drives it, the rest attach to the
    /// entry's watch channel and settle with the same outcome.
    pub async fn ensure<T, F, Fut>(self: &Arc<Self>, key: &QueryKey, fetch: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let fetcher: Fetcher = Arc::new(move || {
            let fut = fetch();
            async move {
                let value = fut.await?;
                serde_json::to_value(value).map_err(ApiError::decode)
            }
            .boxed()
        });

        let admission = {
            let mut entries = self.lock_entries();
            let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::new);
            entry.fetcher = Some(Arc::clone(&fetcher));
            let snapshot = entry.tx.borrow().clone();
            if let Some(value) = snapshot.value.as_ref().filter(|_| snapshot.is_fresh()) {
                Admission::Fresh(Arc::clone(value))
            } else if entry.in_flight {
                Admission::Attach(entry.tx.subscribe())
            } else {
                entry.in_flight = true;
                entry.tx.send_modify(|snap| snap.status = QueryStatus::Loading);
                Admission::Fetch(Arc::clone(&fetcher))
            }
        };

        let value = match admission {
            Admission::Fresh(value) => value,
            Admission::Attach(rx) => await_settled(key, rx).await?,
            Admission::Fetch(fetcher) => {
                debug!(%key, "fetching query");
                let result = fetcher().await;
                let value = self.publish(key, result)?;
                Arc::new(value)
            }
        };
        serde_json::from_value(Value::clone(&value)).map_err(ApiError::decode)
    }

    /// Observe the lifecycle of `key`, creating a placeholder entry when the
    /// key has never been fetched.
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<QuerySnapshot> {
        let mut entries = self.lock_entries();
        entries
            .entry(key.clone())
            .or_insert_with(CacheEntry::new)
            .tx
            .subscribe()
    }

    /// Mark every entry under `prefix` stale and refetch the watched ones.
    ///
    /// Entries without live subscribers stay stale until the next `ensure`;
    /// entries already mid-fetch are not fetched twice.
    pub fn invalidate(self: &Arc<Self>, prefix: &QueryKey) {
        let refetches: Vec<(QueryKey, Fetcher)> = {
            let mut entries = self.lock_entries();
            let mut refetches = Vec::new();
            for (key, entry) in entries.iter_mut() {
                if !key.starts_with(prefix) {
                    continue;
                }
                entry.tx.send_modify(|snap| snap.stale = true);
                if entry.tx.receiver_count() == 0 || entry.in_flight {
                    continue;
                }
                if let Some(fetcher) = entry.fetcher.as_ref() {
                    entry.in_flight = true;
                    entry
                        .tx
                        .send_modify(|snap| snap.status = QueryStatus::Loading);
                    refetches.push((key.clone(), Arc::clone(fetcher)));
                }
            }
            refetches
        };

        for (key, fetcher) in refetches {
            let cache = Arc::clone(self);
            tokio::spawn(async move {
                debug!(%key, "refetching invalidated query");
                let result = fetcher().await;
                if let Err(err) = cache.publish(&key, result) {
                    warn!(%key, error = %err, "background refetch failed");
                }
            });
        }
    }

    /// Evict every entry under `prefix`; their watch channels close.
    pub fn remove(&self, prefix: &QueryKey) {
        let mut entries = self.lock_entries();
        entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Evict everything, e.g. on application teardown.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Settle the entry for `key` with a fetch outcome and hand it back.
    fn publish(&self, key: &QueryKey, result: ApiResult<Value>) -> ApiResult<Value> {
        let mut entries = self.lock_entries();
        // The entry may have been evicted mid-fetch; the driving caller
        // still gets its own result.
        if let Some(entry) = entries.get_mut(key) {
            entry.in_flight = false;
            match &result {
                Ok(value) => {
                    let value = Arc::new(value.clone());
                    entry.tx.send_replace(QuerySnapshot {
                        status: QueryStatus::Ready,
                        value: Some(value),
                        error: None,
                        stale: false,
                    });
                }
                Err(err) => {
                    entry.tx.send_modify(|snap| {
                        snap.status = QueryStatus::Error;
                        snap.error = Some(err.clone());
                        snap.stale = false;
                    });
                }
            }
        }
        result
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wait on an in-flight fetch through the entry's watch channel.
async fn await_settled(
    key: &QueryKey,
    mut rx: watch::Receiver<QuerySnapshot>,
) -> ApiResult<Arc<Value>> {
    loop {
        let snapshot = rx.borrow_and_update().clone();
        match snapshot.status {
            QueryStatus::Ready if snapshot.is_fresh() => {
                if let Some(value) = snapshot.value {
                    return Ok(value);
                }
            }
            QueryStatus::Error => {
                return Err(snapshot
                    .error
                    .unwrap_or_else(|| ApiError::decode("error snapshot without detail")));
            }
            _ => {}
        }
        if rx.changed().await.is_err() {
            // Sender dropped: the entry was evicted before the fetch settled.
            return Err(ApiError::network(format!("query {key} evicted mid-fetch")));
        }
    }
}
