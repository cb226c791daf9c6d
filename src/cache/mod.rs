//! Read-through TTL cache for upstream series
//!
//! Keyed by (source, series id, time bucket) so a refresh within the TTL
//! reuses the previous upstream response. Get-or-compute stays with the
//! caller; there is no single-flight protection, so concurrent cold misses
//! for the same key may each hit the upstream.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache key for one upstream request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Provider name ("fred", "stooq")
    pub source: &'static str,
    /// Series id or symbol
    pub series_id: String,
    /// Requested date range, so a changed range misses
    pub bucket: String,
}

impl CacheKey {
    pub fn new(source: &'static str, series_id: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            source,
            series_id: series_id.into(),
            bucket: bucket.into(),
        }
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Expiring key-value store for fetched series
pub struct SeriesCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, Entry<V>>>,
}

impl<V: Clone> SeriesCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a fresh entry. Expired entries are removed on access.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value, replacing any previous entry for the key
    pub fn insert(&self, key: CacheKey, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of entries, fresh or not (test visibility)
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
