//! Configuration shapes (§6).
//!
//! This crate does not load configuration from files or environment
//! variables — that loading is a boundary adapter per the spec's
//! Non-goals. What lives here is the *shape* of configuration plus
//! validation of its fields, constructed directly by the caller.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PanchangamError, PanchangamResult};
use crate::types::CalendarSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    Linear,
    Lagrange,
    CubicSpline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpolationConfig {
    pub method: InterpolationMethod,
    /// Sample order; must be in `[2, 7]`.
    pub order: u8,
    /// Acceptable weighted error, in degrees, for validation mode.
    pub tolerance: f64,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::Lagrange,
            order: 5,
            tolerance: 0.01,
        }
    }
}

impl InterpolationConfig {
    pub fn validate(&self) -> PanchangamResult<()> {
        if !(2..=7).contains(&self.order) {
            return Err(PanchangamError::validation(
                "panchangam-core",
                "InterpolationConfig::validate",
                format!("order {} out of range [2, 7]", self.order),
            )
            .with_extra("field", "interpolation.order"));
        }
        if self.tolerance <= 0.0 {
            return Err(PanchangamError::validation(
                "panchangam-core",
                "InterpolationConfig::validate",
                format!("tolerance {} must be positive", self.tolerance),
            )
            .with_extra("field", "interpolation.tolerance"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanchangamConfig {
    /// Maximum number of entries retained in the Position Cache.
    pub cache_size: usize,
    /// TTL of each cache entry.
    #[serde(with = "duration_seconds")]
    pub cache_ttl: Duration,
    pub calendar_system_default: CalendarSystem,
    /// Region identifier -> calendar system override.
    pub region_calendar_systems: HashMap<String, CalendarSystem>,
    pub interpolation: InterpolationConfig,
}

impl Default for PanchangamConfig {
    fn default() -> Self {
        Self {
            cache_size: 4096,
            cache_ttl: Duration::from_secs(3600),
            calendar_system_default: CalendarSystem::Purnimanta,
            region_calendar_systems: HashMap::new(),
            interpolation: InterpolationConfig::default(),
        }
    }
}

impl PanchangamConfig {
    pub fn validate(&self) -> PanchangamResult<()> {
        if self.cache_size == 0 {
            return Err(PanchangamError::validation(
                "panchangam-core",
                "PanchangamConfig::validate",
                "cache_size must be positive",
            )
            .with_extra("field", "cache_size"));
        }
        self.interpolation.validate()
    }

    pub fn calendar_system_for_region(&self, region: &str) -> CalendarSystem {
        self.region_calendar_systems
            .get(region)
            .copied()
            .unwrap_or(self.calendar_system_default)
    }
}

mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PanchangamConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_cache_size_is_rejected() {
        let mut cfg = PanchangamConfig::default();
        cfg.cache_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn interpolation_order_out_of_range_is_rejected() {
        let mut cfg = PanchangamConfig::default();
        cfg.interpolation.order = 8;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn region_override_takes_precedence() {
        let mut cfg = PanchangamConfig::default();
        cfg.calendar_system_default = CalendarSystem::Purnimanta;
        cfg.region_calendar_systems
            .insert("Maharashtra".to_string(), CalendarSystem::Amanta);
        assert_eq!(
            cfg.calendar_system_for_region("Maharashtra"),
            CalendarSystem::Amanta
        );
        assert_eq!(
            cfg.calendar_system_for_region("Unknown"),
            CalendarSystem::Purnimanta
        );
    }
}
