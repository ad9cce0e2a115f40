//! Position Cache (component C2).
//!
//! A single-tier, bounded, TTL-expiring cache of computed planetary
//! positions and Panchangam elements, keyed by a deterministic string the
//! caller derives from (Julian Day, body, provider). The teacher's cache
//! crate was a three-tier L1/L2/L3 (memory/Redis/disk) design; the spec
//! scopes persistence out beyond an in-process cache, so L2/L3 and their
//! `redis`/disk dependencies are dropped here (see `DESIGN.md`). What
//! remains -- DashMap-backed storage, LRU eviction, per-key hashing -- is
//! carried over from the teacher's L1 layer essentially unchanged.

pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use store::Store;

/// A deterministic cache key. The raw key is hashed with MD5 (matching the
/// teacher's choice) to produce a fixed-length identifier; collisions are
/// not a correctness concern here since `raw` survives alongside the hash
/// purely for debugging, and lookups are always by the full `CacheKey`
/// (hash included).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub raw: String,
    pub hash: String,
}

impl CacheKey {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let hash = format!("{:x}", md5::compute(&raw));
        Self { raw, hash }
    }

    /// Build a key from the (Julian Day, body-or-element, provider tag)
    /// tuple the Ephemeris Manager and Aggregation Facade look results up
    /// by.
    pub fn for_position(jd: f64, body: &str, provider: &str) -> Self {
        Self::new(format!("pos:{jd:.6}:{body}:{provider}"))
    }

    pub fn for_element(jd: f64, location_hash: &str, element: &str) -> Self {
        Self::new(format!("elem:{jd:.6}:{location_hash}:{element}"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thin facade over [`store::Store`] that serialises typed values to JSON
/// on the way in and deserialises on the way out, so callers don't
/// round-trip through `serde_json::Value` themselves.
pub struct PositionCache {
    store: Store,
}

impl PositionCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            store: Store::new(max_entries, ttl),
        }
    }

    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> Option<T> {
        self.store
            .get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        if let Ok(json) = serde_json::to_value(value) {
            self.store.put(key, json);
        }
    }

    pub fn get_raw(&self, key: &CacheKey) -> Option<Value> {
        self.store.get(key)
    }

    pub fn put_raw(&self, key: CacheKey, value: Value) {
        self.store.put(key, value);
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.store.invalidate(key);
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn sweep_expired(&self) -> usize {
        self.store.sweep_expired()
    }

    pub fn stats(&self) -> CacheStats {
        let (hits, misses, evictions) = self.store.stats_snapshot();
        CacheStats {
            hits,
            misses,
            evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize as De, Serialize as Se};

    #[derive(Debug, Se, De, PartialEq)]
    struct Dummy {
        longitude: f64,
    }

    #[test]
    fn typed_roundtrip() {
        let cache = PositionCache::new(8, Duration::from_secs(60));
        let key = CacheKey::for_position(2451545.0, "Moon", "primary");
        cache.put(key.clone(), &Dummy { longitude: 133.2 });
        let back: Option<Dummy> = cache.get(&key);
        assert_eq!(back, Some(Dummy { longitude: 133.2 }));
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let cache = PositionCache::new(8, Duration::from_secs(60));
        let key = CacheKey::for_position(2451545.0, "Sun", "primary");
        assert!(cache.get_raw(&key).is_none());
        cache.put(key.clone(), &Dummy { longitude: 0.0 });
        let _: Option<Dummy> = cache.get(&key);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn position_and_element_keys_are_distinct() {
        let a = CacheKey::for_position(2451545.0, "Sun", "primary");
        let b = CacheKey::for_element(2451545.0, "abcd1234", "tithi");
        assert_ne!(a.hash, b.hash);
    }
}
