//! Lower-cost provider: truncated equation-of-center for the Sun, the
//! first three lunar longitude perturbation terms, first-order equation of
//! center for the outer planets. Used when the primary provider reports
//! itself unavailable, or when a caller explicitly opts into the cheaper
//! path (e.g. bulk range queries where the primary's extra terms aren't
//! worth the cost).

use panchangam_core::types::{LunarPosition, Planet, PlanetaryPositions, Position, SolarPosition};
use panchangam_core::{PanchangamError, PanchangamResult};

use crate::health::{HealthCache, HealthStatus};
use crate::{elements, moon, positions_via, sun, EphemerisProvider};

/// Valid over the full proleptic-Gregorian range this crate's Julian Day
/// conversion supports, well beyond any realistic Panchangam query — wider
/// than `PrimaryProvider::VALID_RANGE` so the Manager has somewhere to fall
/// back to outside the primary's high-accuracy window.
const VALID_RANGE: (f64, f64) = (0.0, 5_000_000.0);

const SUN_TERMS: u8 = 1;
const MOON_TERMS: usize = 3;
const PLANET_TERMS: u8 = 1;

pub struct FallbackProvider {
    health: HealthCache,
}

impl FallbackProvider {
    pub fn new() -> Self {
        Self {
            health: HealthCache::new(),
        }
    }

    fn check_range(&self, jd: f64) -> PanchangamResult<()> {
        if jd < VALID_RANGE.0 || jd > VALID_RANGE.1 {
            return Err(PanchangamError::out_of_range(
                "panchangam-ephemeris",
                "FallbackProvider",
                format!("jd {jd} outside valid range {VALID_RANGE:?}"),
            ));
        }
        Ok(())
    }
}

impl Default for FallbackProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisProvider for FallbackProvider {
    fn positions(&self, jd: f64) -> PanchangamResult<PlanetaryPositions> {
        self.check_range(jd)?;
        Ok(positions_via(jd, SUN_TERMS, MOON_TERMS, PLANET_TERMS))
    }

    fn position(&self, jd: f64, planet: Planet) -> PanchangamResult<Position> {
        self.check_range(jd)?;
        Ok(match planet {
            Planet::Sun => sun::position(jd, SUN_TERMS),
            Planet::Moon => moon::position(jd, MOON_TERMS),
            other => elements::planet_position(other, jd, PLANET_TERMS),
        })
    }

    fn sun(&self, jd: f64) -> PanchangamResult<SolarPosition> {
        self.check_range(jd)?;
        Ok(sun::detailed(jd, SUN_TERMS))
    }

    fn moon(&self, jd: f64) -> PanchangamResult<LunarPosition> {
        self.check_range(jd)?;
        Ok(moon::detailed(jd, MOON_TERMS))
    }

    fn available(&self) -> bool {
        self.health().available
    }

    fn range(&self) -> (f64, f64) {
        VALID_RANGE
    }

    fn health(&self) -> HealthStatus {
        self.health.get_or_probe(|| HealthStatus::HEALTHY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    #[test]
    fn positions_cover_all_bodies_in_range() {
        let provider = FallbackProvider::new();
        let positions = provider.positions(J2000_EPOCH).unwrap();
        assert_eq!(positions.positions.len(), 10);
    }

    #[test]
    fn agrees_with_primary_within_loose_tolerance() {
        use crate::primary::PrimaryProvider;
        let primary = PrimaryProvider::new();
        let fallback = FallbackProvider::new();
        let p = primary.position(J2000_EPOCH + 1000.0, Planet::Moon).unwrap();
        let f = fallback.position(J2000_EPOCH + 1000.0, Planet::Moon).unwrap();
        assert!((p.longitude - f.longitude).abs() < 2.0);
    }
}
