//! Lunar phase (§4.5). Pinned to a fixed near-new-moon reference epoch so
//! phase age is reproducible across runs and implementations.

use chrono::{DateTime, Utc};

use panchangam_core::jd::civil_to_jd;
use panchangam_core::types::{LunarPhase, PhaseName};

/// Reference new moon, JD 2451549.5. Pinned per the geometry contract: any
/// deviation here propagates as a constant offset in reported phase age.
const REFERENCE_NEW_MOON_JD: f64 = 2451549.5;

const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

fn phase_name(phase: f64) -> PhaseName {
    let bin = (phase * 8.0).floor() as i64;
    match bin.rem_euclid(8) {
        0 => PhaseName::New,
        1 => PhaseName::WaxingCrescent,
        2 => PhaseName::FirstQuarter,
        3 => PhaseName::WaxingGibbous,
        4 => PhaseName::Full,
        5 => PhaseName::WaningGibbous,
        6 => PhaseName::LastQuarter,
        _ => PhaseName::WaningCrescent,
    }
}

fn jd_to_instant(jd: f64) -> DateTime<Utc> {
    panchangam_core::jd::jd_to_civil(jd)
}

/// Compute the lunar phase at `instant`.
pub fn lunar_phase(instant: DateTime<Utc>) -> LunarPhase {
    let jd = civil_to_jd(instant);
    let days_since_epoch = jd - REFERENCE_NEW_MOON_JD;
    let lunations = days_since_epoch / SYNODIC_MONTH_DAYS;
    let phase = lunations.rem_euclid(1.0);

    let age_days = phase * SYNODIC_MONTH_DAYS;
    let illumination = (1.0 - (2.0 * std::f64::consts::PI * phase).cos()) / 2.0 * 100.0;
    let name = phase_name(phase);

    let completed_lunations = lunations.floor();
    let next_quarter_index = (phase * 4.0).floor() + 1.0;
    let next_principal_jd =
        REFERENCE_NEW_MOON_JD + (completed_lunations + next_quarter_index / 4.0) * SYNODIC_MONTH_DAYS;
    let next_principal_phase = jd_to_instant(next_principal_jd);

    LunarPhase {
        phase,
        illumination,
        name,
        age_days,
        next_principal_phase,
    }
}
