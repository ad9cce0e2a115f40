//! Ephemeris Manager (component C3).
//!
//! Routes a `positions(jd)` / `position(jd, planet)` request through:
//! cache lookup → primary provider (if healthy and JD in range) → fallback
//! provider (if primary failed or JD out of range) → propagate failure.
//! Populates the cache on success and records provenance. Never rewrites a
//! value a provider returned — that is the Interpolator's job, a separate
//! stage downstream of this one.

use std::time::Duration;

use panchangam_cache::{CacheKey, PositionCache};
use panchangam_core::observer::Observer;
use panchangam_core::types::{
    LunarPosition, Planet, PlanetaryPositions, Position, Provenance, ProviderTag, SolarPosition,
};
use panchangam_core::{PanchangamError, PanchangamResult};
use panchangam_ephemeris::fallback::FallbackProvider;
use panchangam_ephemeris::primary::PrimaryProvider;
use panchangam_ephemeris::EphemerisProvider;

/// A value paired with the provenance of how it was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Provenanced<T> {
    pub value: T,
    pub provenance: Provenance,
}

pub struct EphemerisManager {
    primary: PrimaryProvider,
    fallback: FallbackProvider,
    cache: PositionCache,
}

impl EphemerisManager {
    pub fn new(cache_size: usize, cache_ttl: Duration) -> Self {
        Self {
            primary: PrimaryProvider::new(),
            fallback: FallbackProvider::new(),
            cache: PositionCache::new(cache_size, cache_ttl),
        }
    }

    /// Validate a provider's invariant before it leaves the Manager: ecliptic
    /// longitude must already be normalised to `[0, 360)`. A violation here
    /// is a provider bug, not a caller error, so it is surfaced as a hard
    /// internal error with no retry, per the Manager's documented failure
    /// modes.
    fn check_longitude_invariant(position: &Position, component: &str) -> PanchangamResult<()> {
        if !(0.0..360.0).contains(&position.longitude) {
            return Err(PanchangamError::internal(
                component,
                "check_longitude_invariant",
                format!("longitude {} outside [0, 360)", position.longitude),
            ));
        }
        Ok(())
    }

    fn pick_provider(&self, jd: f64) -> PanchangamResult<(&dyn EphemerisProvider, ProviderTag)> {
        let (primary_lo, primary_hi) = self.primary.range();
        let primary_in_range = jd >= primary_lo && jd <= primary_hi;
        let primary_ok = self.primary.available() && self.primary.health().available && primary_in_range;

        if primary_ok {
            return Ok((&self.primary, ProviderTag::Primary));
        }

        let (fallback_lo, fallback_hi) = self.fallback.range();
        let fallback_in_range = jd >= fallback_lo && jd <= fallback_hi;

        if !primary_in_range && !fallback_in_range {
            return Err(PanchangamError::out_of_range(
                "panchangam-manager::EphemerisManager",
                "pick_provider",
                format!("jd {jd} is out of range for both primary and fallback providers"),
            ));
        }

        if self.fallback.available() && self.fallback.health().available && fallback_in_range {
            return Ok((&self.fallback, ProviderTag::Fallback));
        }

        Err(PanchangamError::provider_unavailable(
            "panchangam-manager::EphemerisManager",
            "pick_provider",
            "primary unhealthy and fallback unavailable",
        ))
    }

    /// Single-body position for `jd`, cache-first.
    pub fn position(&self, jd: f64, planet: Planet) -> PanchangamResult<Provenanced<Position>> {
        let (provider, tag) = self.pick_provider(jd)?;
        let key = CacheKey::for_position(jd, planet.name(), tag_label(tag));

        if let Some(cached) = self.cache.get::<Position>(&key) {
            return Ok(Provenanced {
                value: cached,
                provenance: Provenance {
                    provider: tag,
                    cache_hit: true,
                    interpolated: false,
                },
            });
        }

        let value = provider.position(jd, planet)?;
        Self::check_longitude_invariant(&value, "panchangam-manager::EphemerisManager")?;
        self.cache.put(key, &value);

        Ok(Provenanced {
            value,
            provenance: Provenance {
                provider: tag,
                cache_hit: false,
                interpolated: false,
            },
        })
    }

    /// All ten bodies for `jd`, cache-first.
    pub fn positions(&self, jd: f64) -> PanchangamResult<Provenanced<PlanetaryPositions>> {
        let (provider, tag) = self.pick_provider(jd)?;
        let key = CacheKey::for_position(jd, "all", tag_label(tag));

        if let Some(cached) = self.cache.get::<PlanetaryPositions>(&key) {
            return Ok(Provenanced {
                value: cached,
                provenance: Provenance {
                    provider: tag,
                    cache_hit: true,
                    interpolated: false,
                },
            });
        }

        let value = provider.positions(jd)?;
        for position in value.positions.values() {
            Self::check_longitude_invariant(position, "panchangam-manager::EphemerisManager")?;
        }
        self.cache.put(key, &value);

        Ok(Provenanced {
            value,
            provenance: Provenance {
                provider: tag,
                cache_hit: false,
                interpolated: false,
            },
        })
    }

    pub fn sun(&self, jd: f64) -> PanchangamResult<Provenanced<SolarPosition>> {
        let (provider, tag) = self.pick_provider(jd)?;
        let key = CacheKey::for_position(jd, "sun-detailed", tag_label(tag));

        if let Some(cached) = self.cache.get::<SolarPosition>(&key) {
            return Ok(Provenanced {
                value: cached,
                provenance: Provenance {
                    provider: tag,
                    cache_hit: true,
                    interpolated: false,
                },
            });
        }

        let value = provider.sun(jd)?;
        Self::check_longitude_invariant(&value.position, "panchangam-manager::EphemerisManager")?;
        self.cache.put(key, &value);

        Ok(Provenanced {
            value,
            provenance: Provenance {
                provider: tag,
                cache_hit: false,
                interpolated: false,
            },
        })
    }

    pub fn moon(&self, jd: f64) -> PanchangamResult<Provenanced<LunarPosition>> {
        let (provider, tag) = self.pick_provider(jd)?;
        let key = CacheKey::for_position(jd, "moon-detailed", tag_label(tag));

        if let Some(cached) = self.cache.get::<LunarPosition>(&key) {
            return Ok(Provenanced {
                value: cached,
                provenance: Provenance {
                    provider: tag,
                    cache_hit: true,
                    interpolated: false,
                },
            });
        }

        let value = provider.moon(jd)?;
        Self::check_longitude_invariant(&value.position, "panchangam-manager::EphemerisManager")?;
        self.cache.put(key, &value);

        Ok(Provenanced {
            value,
            provenance: Provenance {
                provider: tag,
                cache_hit: false,
                interpolated: false,
            },
        })
    }

    /// Borrow the primary provider directly, for callers (e.g. the
    /// Interpolator) that need to sample a provider at several JDs without
    /// going through the cache at every point.
    pub fn primary_provider(&self) -> &dyn EphemerisProvider {
        &self.primary
    }

    pub fn cache_stats(&self) -> panchangam_cache::CacheStats {
        self.cache.stats()
    }
}

fn tag_label(tag: ProviderTag) -> &'static str {
    match tag {
        ProviderTag::Primary => "primary",
        ProviderTag::Fallback => "fallback",
    }
}

/// Emit the standard span/event pair around a Manager call, matching the
/// Observability Seam's "span ends before the method returns" invariant.
pub fn observed_positions(
    manager: &EphemerisManager,
    jd: f64,
    observer: &dyn Observer,
) -> PanchangamResult<Provenanced<PlanetaryPositions>> {
    let mut span = observer.span("panchangam-manager", "positions");
    span.set_attribute("jd", &format!("{jd:.6}"));
    let result = manager.positions(jd);
    match &result {
        Ok(provenanced) => {
            span.add_event(
                "resolved",
                &[
                    ("provider", tag_label(provenanced.provenance.provider)),
                    ("cache_hit", &provenanced.provenance.cache_hit.to_string()),
                ],
            );
        }
        Err(err) => observer.record_error(err),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    fn manager() -> EphemerisManager {
        EphemerisManager::new(64, Duration::from_secs(60))
    }

    #[test]
    fn first_lookup_is_a_miss_second_is_a_hit() {
        let m = manager();
        let first = m.position(J2000_EPOCH, Planet::Sun).unwrap();
        assert!(!first.provenance.cache_hit);
        let second = m.position(J2000_EPOCH, Planet::Sun).unwrap();
        assert!(second.provenance.cache_hit);
        assert_eq!(first.value, second.value);
    }

    #[test]
    fn uses_primary_provider_within_its_range() {
        let m = manager();
        let p = m.position(J2000_EPOCH + 10.0, Planet::Moon).unwrap();
        assert_eq!(p.provenance.provider, ProviderTag::Primary);
    }

    #[test]
    fn routes_to_fallback_when_primary_out_of_range() {
        let m = manager();
        // Well outside PrimaryProvider's ~1900-2100 window but still inside
        // FallbackProvider's much wider one.
        let far_future_jd = J2000_EPOCH + 200_000.0;
        let p = m.position(far_future_jd, Planet::Sun).unwrap();
        assert_eq!(p.provenance.provider, ProviderTag::Fallback);
    }

    #[test]
    fn jd_out_of_range_for_both_providers_is_out_of_range_error() {
        let m = manager();
        let err = m.position(-1.0e9, Planet::Sun).unwrap_err();
        assert_eq!(
            panchangam_core::BoundaryErrorCode::from(&err),
            panchangam_core::BoundaryErrorCode::OutOfRange
        );
    }

    #[test]
    fn all_ten_positions_round_trip_through_cache() {
        let m = manager();
        let first = m.positions(J2000_EPOCH + 42.0).unwrap();
        assert_eq!(first.value.positions.len(), 10);
        let second = m.positions(J2000_EPOCH + 42.0).unwrap();
        assert!(second.provenance.cache_hit);
    }

    #[test]
    fn sun_and_moon_detailed_lookups_work() {
        let m = manager();
        let sun = m.sun(J2000_EPOCH).unwrap();
        assert!((0.0..360.0).contains(&sun.value.position.longitude));
        let moon = m.moon(J2000_EPOCH).unwrap();
        assert!((0.0..360.0).contains(&moon.value.position.longitude));
    }

    #[test]
    fn observed_positions_does_not_panic_with_a_noop_observer() {
        let m = manager();
        let obs = panchangam_core::NoOpObserver;
        let result = observed_positions(&m, J2000_EPOCH, &obs);
        assert!(result.is_ok());
    }
}
