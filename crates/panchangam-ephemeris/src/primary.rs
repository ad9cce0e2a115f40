//! Higher-precision provider: full equation-of-center terms for the Sun,
//! the first eight lunar longitude perturbation terms, and second-order
//! equation of center for the outer planets.

use panchangam_core::types::{LunarPosition, Planet, PlanetaryPositions, Position, SolarPosition};
use panchangam_core::{PanchangamError, PanchangamResult};

use crate::health::{HealthCache, HealthStatus};
use crate::{elements, moon, positions_via, sun, EphemerisProvider};

/// Valid for roughly 1900-01-01 through 2100-01-01 (JD 2415020-2488070), the
/// window over which this provider's truncated series stays within its
/// documented accuracy. Outside it the Manager falls back to the wider,
/// lower-precision `FallbackProvider`.
const VALID_RANGE: (f64, f64) = (2_415_020.0, 2_488_070.0);

const SUN_TERMS: u8 = 3;
const MOON_TERMS: usize = 8;
const PLANET_TERMS: u8 = 2;

pub struct PrimaryProvider {
    health: HealthCache,
}

impl PrimaryProvider {
    pub fn new() -> Self {
        Self {
            health: HealthCache::new(),
        }
    }

    fn check_range(&self, jd: f64) -> PanchangamResult<()> {
        if jd < VALID_RANGE.0 || jd > VALID_RANGE.1 {
            return Err(PanchangamError::out_of_range(
                "panchangam-ephemeris",
                "PrimaryProvider",
                format!("jd {jd} outside valid range {VALID_RANGE:?}"),
            ));
        }
        Ok(())
    }
}

impl Default for PrimaryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisProvider for PrimaryProvider {
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
    fn rejects_jd_out_of_range() {
        let provider = PrimaryProvider::new();
        assert!(provider.positions(-1.0).is_err());
    }

    #[test]
    fn positions_cover_all_bodies_in_range() {
        let provider = PrimaryProvider::new();
        let positions = provider.positions(J2000_EPOCH).unwrap();
        assert_eq!(positions.positions.len(), 10);
    }

    #[test]
    fn reports_available_by_default() {
        let provider = PrimaryProvider::new();
        assert!(provider.available());
    }
}
