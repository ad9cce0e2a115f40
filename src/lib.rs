//! Astronomical calculation core for a Hindu calendar (Panchangam) service.
//!
//! This crate is a thin public facade over the workspace's components:
//! Ephemeris Providers and the Manager that routes between them (C1-C3),
//! the Interpolator (C4), Solar/Lunar Geometry (C5), the five classical
//! Element Calculators (C6), the Day-Period Partitioner (C7), the
//! Aggregation Facade that ties them together (C8), the Observability Seam
//! (C9), and Validation (C10). Most applications only need
//! [`compute_day_record`] and the types it returns.

pub use panchangam_core::config::{InterpolationConfig, InterpolationMethod, PanchangamConfig};
pub use panchangam_core::error::{BoundaryErrorCode, Category, PanchangamError, PanchangamResult, Severity};
pub use panchangam_core::observer::{NoOpObserver, Observer, Span};
pub use panchangam_core::types::*;
pub use panchangam_core::{festivals, zone};

pub use panchangam_cache::{CacheKey, CacheStats, PositionCache};
pub use panchangam_ephemeris::{fallback::FallbackProvider, primary::PrimaryProvider, EphemerisProvider};
pub use panchangam_manager::{EphemerisManager, Provenanced};

pub use panchangam_interpolate::{interpolate, interpolate_and_validate, weighted_error};

pub use panchangam_geometry::{lunar_phase, lunar_times, rise_set_for, solve_hour_angle, sun_times, HourAngleResult};

pub use panchangam_elements::{
    hora_for, karana, moon_sun_separation, nakshatra, tithi, vara, yoga,
};

pub use panchangam_dayperiods::{abhijit_muhurta, inauspicious_periods};

pub use panchangam_aggregate::{compute_day_record, DayRecord};

pub use panchangam_validate::{
    check_drift, validate_day_period, validate_karana, validate_nakshatra, validate_position,
    validate_sun_times, validate_tithi, validate_vara, validate_yoga, DriftTolerance, ReferenceValues,
};

pub use panchangam_observability::{NoOpTracingObserver, TracingObserver};
