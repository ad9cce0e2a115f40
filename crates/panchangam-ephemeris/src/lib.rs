//! Ephemeris Providers (component C1).
//!
//! Two deterministic, CPU-only implementations of a shared
//! [`EphemerisProvider`] trait: [`primary::PrimaryProvider`], a higher-term
//! series for routine use, and [`fallback::FallbackProvider`], a cheaper
//! truncated series the Ephemeris Manager falls back to when the primary
//! reports itself unavailable or when a caller explicitly asks for the
//! degraded path.
//!
//! Every calculation here is a pure function of a Julian Day; there is no
//! I/O inside a position call, so the trait is plain `Send + Sync` rather
//! than `async_trait` — there is nothing to `.await`.

pub mod elements;
pub mod fallback;
pub mod health;
pub mod moon;
pub mod primary;
pub mod sun;

use panchangam_core::types::{LunarPosition, Planet, PlanetaryPositions, Position, SolarPosition};
use panchangam_core::PanchangamResult;

use health::HealthStatus;

/// A source of planetary positions for a given Julian Day.
///
/// Implementors must be safe to share across threads without interior
/// mutation of their computed results — the Ephemeris Manager may call the
/// same provider concurrently from a `rayon` fan-out.
pub trait EphemerisProvider: Send + Sync {
    /// Positions for all ten bodies at `jd`.
    fn positions(&self, jd: f64) -> PanchangamResult<PlanetaryPositions>;

    /// Position for a single body, when the caller doesn't need the full set.
    fn position(&self, jd: f64, planet: Planet) -> PanchangamResult<Position>;

    fn sun(&self, jd: f64) -> PanchangamResult<SolarPosition>;

    fn moon(&self, jd: f64) -> PanchangamResult<LunarPosition>;

    /// Cheap liveness check; does not imply accuracy, only that the provider
    /// can currently answer requests.
    fn available(&self) -> bool;

    /// The Julian Day range this provider claims to be valid over.
    fn range(&self) -> (f64, f64);

    fn health(&self) -> HealthStatus;
}

/// Shared implementation of [`EphemerisProvider::positions`] given closures
/// for the Sun/Moon/other-planet terms a provider wants to use; both
/// `PrimaryProvider` and `FallbackProvider` build their full-set answer this
/// way so the fan-out logic isn't duplicated between them.
fn positions_via(
    jd: f64,
    sun_terms: u8,
    moon_terms: usize,
    planet_terms: u8,
) -> PlanetaryPositions {
    let mut positions = std::collections::BTreeMap::new();
    positions.insert(Planet::Sun, sun::position(jd, sun_terms));
    positions.insert(Planet::Moon, moon::position(jd, moon_terms));
    for planet in Planet::ALL {
        if matches!(planet, Planet::Sun | Planet::Moon) {
            continue;
        }
        positions.insert(planet, elements::planet_position(planet, jd, planet_terms));
    }
    PlanetaryPositions { jd, positions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    #[test]
    fn positions_via_covers_all_ten_bodies() {
        let p = positions_via(J2000_EPOCH, 3, 8, 2);
        assert_eq!(p.positions.len(), 10);
    }
}
