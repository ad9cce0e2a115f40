//! Bounded in-memory store -- DashMap-backed, LRU eviction by entry count,
//! TTL-based expiry. The spec scopes out persistence beyond an in-process
//! cache, so this is the only tier; it plays the role the teacher's L1
//! in-memory layer played, generalized to a count-based rather than
//! byte-size-based bound since callers configure `cache_size` as an entry
//! count (`PanchangamConfig::cache_size`).

use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::CacheKey;

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub value: Value,
    pub created_at: Instant,
    pub accessed_at: Instant,
    pub access_count: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StoreStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub evictions: AtomicU64,
}

impl Clone for StoreStats {
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits.load(Ordering::Relaxed)),
            misses: AtomicU64::new(self.misses.load(Ordering::Relaxed)),
            evictions: AtomicU64::new(self.evictions.load(Ordering::Relaxed)),
        }
    }
}

pub struct Store {
    entries: Arc<DashMap<CacheKey, Entry>>,
    max_entries: usize,
    ttl: Duration,
    stats: StoreStats,
}

impl Store {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_entries,
            ttl,
            stats: StoreStats::default(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let mut expired = false;
        let result = self.entries.get_mut(key).and_then(|mut entry| {
            if entry.created_at.elapsed() > self.ttl {
                expired = true;
                None
            } else {
                entry.accessed_at = Instant::now();
                entry.access_count += 1;
                Some(entry.value.clone())
            }
        });

        if expired {
            self.entries.remove(key);
        }

        if result.is_some() {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    pub fn put(&self, key: CacheKey, value: Value) {
        self.ensure_capacity();
        let now = Instant::now();
        self.entries.insert(
            key,
            Entry {
                value,
                created_at: now,
                accessed_at: now,
                access_count: 0,
            },
        );
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries proactively; the manager calls this
    /// periodically rather than relying solely on lazy expiry at `get`.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|e| now.duration_since(e.value().created_at) > self.ttl)
            .map(|e| e.key().clone())
            .collect();
        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
        }
        count
    }

    pub(crate) fn stats_snapshot(&self) -> (u64, u64, u64) {
        (
            self.stats.hits.load(Ordering::Relaxed),
            self.stats.misses.load(Ordering::Relaxed),
            self.stats.evictions.load(Ordering::Relaxed),
        )
    }

    fn ensure_capacity(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }
        let mut candidates: Vec<(CacheKey, Instant, u64)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().accessed_at, e.value().access_count))
            .collect();
        candidates.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.cmp(&b.2)));

        let to_evict = candidates.len().saturating_sub(self.max_entries) + 1;
        for (key, _, _) in candidates.into_iter().take(to_evict) {
            self.entries.remove(&key);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }
}
