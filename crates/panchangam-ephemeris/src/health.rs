//! Provider health probing. A provider is CPU-only and has no external
//! dependency to go unavailable, but the spec still asks for an `available`/
//! `health` seam so the Ephemeris Manager can fail over without special-
//! casing "this provider type never fails" — and so a future provider
//! backed by a real ephemeris file can report degraded health without
//! changing the trait.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Result of a provider self-check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthStatus {
    pub available: bool,
    pub message: &'static str,
}

impl HealthStatus {
    pub const HEALTHY: HealthStatus = HealthStatus {
        available: true,
        message: "ok",
    };
}

const PROBE_TTL: Duration = Duration::from_secs(30);

/// Caches the result of a health probe for `PROBE_TTL` so repeated calls in
/// a hot path don't re-run the check on every position request. `Mutex`-
/// guarded rather than `Cell`-based so providers stay `Sync`.
pub struct HealthCache {
    state: Mutex<(Option<Instant>, HealthStatus)>,
}

impl HealthCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new((None, HealthStatus::HEALTHY)),
        }
    }

    /// Return the cached status if still fresh, otherwise compute a new one
    /// with `probe` and cache it.
    pub fn get_or_probe(&self, probe: impl FnOnce() -> HealthStatus) -> HealthStatus {
        let now = Instant::now();
        let mut guard = self.state.lock().expect("health cache mutex poisoned");
        if let Some(last) = guard.0 {
            if now.duration_since(last) < PROBE_TTL {
                return guard.1;
            }
        }
        let status = probe();
        *guard = (Some(now), status);
        status
    }
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_until_ttl_expires() {
        let cache = HealthCache::new();
        let mut calls = 0;
        let status = cache.get_or_probe(|| {
            calls += 1;
            HealthStatus::HEALTHY
        });
        assert!(status.available);
        // Second call within the TTL window must not re-invoke the probe.
        let _ = cache.get_or_probe(|| {
            calls += 1;
            HealthStatus::HEALTHY
        });
        assert_eq!(calls, 1);
    }
}
