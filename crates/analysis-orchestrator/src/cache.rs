use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;

/// Internal cache entry with timestamp
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.cached_at < ttl
    }
}

/// Keyed cache whose entries expire `ttl` after insertion.
pub struct TtlCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    /// One gate per key with a fetch in progress
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    ttl: Duration,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(self.ttl, Utc::now()) {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, key: String, data: T) {
        self.entries.insert(key, CacheEntry {
            data,
            cached_at: Utc::now(),
        });
    }

    /// Return the fresh entry or compute one while holding the key's shard,
    /// so concurrent misses on one key compute once. The flag is true on a hit.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> T) -> (T, bool) {
        let now = Utc::now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_fresh(self.ttl, now) {
                    return (occupied.get().data.clone(), true);
                }
                let data = compute();
                occupied.insert(CacheEntry {
                    data: data.clone(),
                    cached_at: now,
                });
                (data, false)
            }
            Entry::Vacant(vacant) => {
                let data = compute();
                vacant.insert(CacheEntry {
                    data: data.clone(),
                    cached_at: now,
                });
                (data, false)
            }
        }
    }

    /// Async counterpart of `get_or_insert_with` for fallible fetches.
    ///
    /// Concurrent misses on one key queue behind a single fetch and are served
    /// from its result. Errors are returned to the caller that fetched and are
    /// never cached, so the next waiter fetches again.
    pub async fn get_or_try_fetch<E, F, Fut>(&self, key: &str, fetch: F) -> Result<(T, bool), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.get(key) {
            return Ok((data, true));
        }

        let gate = self.in_flight.entry(key.to_string()).or_default().clone();
        let result = {
            let _turn = gate.lock().await;
            match self.get(key) {
                Some(data) => Ok((data, true)),
                None => fetch().await.map(|data| {
                    self.insert(key.to_string(), data.clone());
                    (data, false)
                }),
            }
        };

        drop(gate);
        // Last one out removes the gate
        self.in_flight
            .remove_if(key, |_, gate| Arc::strong_count(gate) == 1);
        result
    }

    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn remove_prefix(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    /// Drop expired entries; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
