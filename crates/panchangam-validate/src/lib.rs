//! Validation (component C10).
//!
//! Two independent checks: structural invariant validators that hold for
//! every record a calculator can produce, and a drift validator that
//! compares a computed (Tithi, Nakshatra, Yoga, Sunrise) against an
//! externally supplied reference within an angular or minute tolerance.
//! Both report violations as `PanchangamError::internal` — an invariant
//! violation is always a hard error, never retried, per the error taxonomy.

use chrono::{DateTime, Utc};

use panchangam_core::types::{
    DayKind, DayPeriod, Karana, KaranaKind, Nakshatra, Position, SunTimes, Tithi, TithiCategory,
    Vara, Yoga,
};
use panchangam_core::PanchangamError;

const COMPONENT: &str = "panchangam-validate";

/// Validate a `Position`: longitude normalised to `[0, 360)`, latitude in
/// `[-90, 90]`, distance positive.
pub fn validate_position(position: &Position) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(0.0..360.0).contains(&position.longitude) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_position",
            format!("longitude {} outside [0, 360)", position.longitude),
        ));
    }
    if !(-90.0..=90.0).contains(&position.latitude) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_position",
            format!("latitude {} outside [-90, 90]", position.latitude),
        ));
    }
    if position.distance <= 0.0 {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_position",
            format!("distance {} is not positive", position.distance),
        ));
    }
    errors
}

/// Validate `SunTimes`: sunrise < sunset in the normal case; the sentinel
/// pairs hold exactly in the polar cases.
pub fn validate_sun_times(sun_times: &SunTimes) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    match sun_times.kind {
        DayKind::Normal => {
            if sun_times.sunrise >= sun_times.sunset {
                errors.push(PanchangamError::internal(
                    COMPONENT,
                    "validate_sun_times",
                    "normal day has sunrise >= sunset",
                ));
            }
        }
        DayKind::PolarNight => {
            if sun_times.sunrise != sun_times.sunset {
                errors.push(PanchangamError::internal(
                    COMPONENT,
                    "validate_sun_times",
                    "polar-night sunrise and sunset sentinel must be equal",
                ));
            }
        }
        DayKind::PolarDay => {
            if sun_times.sunrise >= sun_times.sunset {
                errors.push(PanchangamError::internal(
                    COMPONENT,
                    "validate_sun_times",
                    "polar-day start-of-day sentinel must precede end-of-day sentinel",
                ));
            }
        }
    }
    errors
}

/// Validate a `Tithi`: number in range and consistent with its category and
/// paksha-day derivation.
pub fn validate_tithi(tithi: &Tithi) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(1..=30).contains(&tithi.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_tithi",
            format!("tithi number {} outside [1, 30]", tithi.number),
        ));
    }
    if !(1..=15).contains(&tithi.paksha_day) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_tithi",
            format!("paksha_day {} outside [1, 15]", tithi.paksha_day),
        ));
    }
    let expected_category = match tithi.paksha_day % 15 {
        1 | 6 | 11 => TithiCategory::Nanda,
        2 | 7 | 12 => TithiCategory::Bhadra,
        3 | 8 | 13 => TithiCategory::Jaya,
        4 | 9 | 14 => TithiCategory::Rikta,
        _ => TithiCategory::Purna,
    };
    if tithi.category != expected_category {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_tithi",
            format!(
                "tithi category {:?} does not match paksha_day {} (expected {:?})",
                tithi.category, tithi.paksha_day, expected_category
            ),
        ));
    }
    if tithi.start >= tithi.end {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_tithi",
            "tithi start is not before end",
        ));
    }
    errors
}

/// Validate a `Nakshatra`: number and pada both in range.
pub fn validate_nakshatra(nakshatra: &Nakshatra) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(1..=27).contains(&nakshatra.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_nakshatra",
            format!("nakshatra number {} outside [1, 27]", nakshatra.number),
        ));
    }
    if !(1..=4).contains(&nakshatra.pada) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_nakshatra",
            format!("pada {} outside [1, 4]", nakshatra.pada),
        ));
    }
    if !(0.0..360.0).contains(&nakshatra.moon_longitude) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_nakshatra",
            format!("moon_longitude {} outside [0, 360)", nakshatra.moon_longitude),
        ));
    }
    if nakshatra.start >= nakshatra.end {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_nakshatra",
            "nakshatra start is not before end",
        ));
    }
    errors
}

/// Validate a `Yoga`: number in range, `combinedValue` normalised.
pub fn validate_yoga(yoga: &Yoga) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(1..=27).contains(&yoga.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_yoga",
            format!("yoga number {} outside [1, 27]", yoga.number),
        ));
    }
    if !(0.0..360.0).contains(&yoga.combined_value) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_yoga",
            format!("combined_value {} outside [0, 360)", yoga.combined_value),
        ));
    }
    errors
}

/// Validate a `Karana`: number in range, `isVishti` iff number 8, and
/// Fixed Karanas confined to the documented range (9, 10, 11).
pub fn validate_karana(karana: &Karana) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(1..=11).contains(&karana.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_karana",
            format!("karana number {} outside [1, 11]", karana.number),
        ));
    }
    if (karana.number == 8) != karana.is_vishti {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_karana",
            format!("is_vishti flag inconsistent with number {}", karana.number),
        ));
    }
    let expected_kind = if karana.number >= 9 { KaranaKind::Fixed } else { KaranaKind::Movable };
    if karana.kind != expected_kind {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_karana",
            format!("karana kind {:?} inconsistent with number {}", karana.kind, karana.number),
        ));
    }
    if !(1..=2).contains(&karana.half) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_karana",
            format!("half {} outside {{1, 2}}", karana.half),
        ));
    }
    if karana.duration_hours <= 0.0 {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_karana",
            "karana duration_hours is not positive",
        ));
    }
    errors
}

/// Validate a `Vara`: number in range with Sunday = 1, end after start,
/// current Hora number in range.
pub fn validate_vara(vara: &Vara) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if !(1..=7).contains(&vara.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_vara",
            format!("vara number {} outside [1, 7]", vara.number),
        ));
    }
    if vara.start >= vara.end {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_vara",
            "vara start is not before end",
        ));
    }
    if !(1..=24).contains(&vara.current_hora.number) {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_vara",
            format!("hora number {} outside [1, 24]", vara.current_hora.number),
        ));
    }
    errors
}

/// Validate a `DayPeriod`: end after start, non-negative duration.
pub fn validate_day_period(period: &DayPeriod) -> Vec<PanchangamError> {
    let mut errors = Vec::new();
    if period.start >= period.end {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_day_period",
            "day period start is not before end",
        ));
    }
    if period.duration_minutes < 0.0 {
        errors.push(PanchangamError::internal(
            COMPONENT,
            "validate_day_period",
            "day period has negative duration",
        ));
    }
    errors
}

/// Angular or temporal tolerance for the drift validator.
#[derive(Debug, Clone, Copy)]
pub struct DriftTolerance {
    pub angular_degrees: f64,
    pub minutes: f64,
}

impl Default for DriftTolerance {
    fn default() -> Self {
        Self { angular_degrees: 1.0, minutes: 5.0 }
    }
}

/// Externally supplied reference values a drift check is run against. Any
/// field left `None` is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceValues {
    pub moon_sun_separation: Option<f64>,
    pub moon_longitude: Option<f64>,
    pub combined_value: Option<f64>,
    pub sunrise: Option<DateTime<Utc>>,
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Compare computed Tithi/Nakshatra/Yoga/Sunrise against `reference`,
/// returning one violation per field whose drift exceeds `tolerance`.
pub fn check_drift(
    tithi: &Tithi,
    nakshatra: &Nakshatra,
    yoga: &Yoga,
    sun_times: &SunTimes,
    reference: &ReferenceValues,
    tolerance: &DriftTolerance,
) -> Vec<PanchangamError> {
    let mut errors = Vec::new();

    if let Some(expected) = reference.moon_sun_separation {
        let drift = angular_distance(tithi.moon_sun_separation, expected);
        if drift > tolerance.angular_degrees {
            errors.push(PanchangamError::calculation(
                COMPONENT,
                "check_drift",
                format!("tithi moon-sun separation drifted {drift:.3} degrees from reference"),
            ));
        }
    }

    if let Some(expected) = reference.moon_longitude {
        let drift = angular_distance(nakshatra.moon_longitude, expected);
        if drift > tolerance.angular_degrees {
            errors.push(PanchangamError::calculation(
                COMPONENT,
                "check_drift",
                format!("nakshatra moon longitude drifted {drift:.3} degrees from reference"),
            ));
        }
    }

    if let Some(expected) = reference.combined_value {
        let drift = angular_distance(yoga.combined_value, expected);
        if drift > tolerance.angular_degrees {
            errors.push(PanchangamError::calculation(
                COMPONENT,
                "check_drift",
                format!("yoga combined value drifted {drift:.3} degrees from reference"),
            ));
        }
    }

    if let Some(expected) = reference.sunrise {
        let drift_minutes = (sun_times.sunrise - expected).num_seconds().unsigned_abs() as f64 / 60.0;
        if drift_minutes > tolerance.minutes {
            errors.push(PanchangamError::calculation(
                COMPONENT,
                "check_drift",
                format!("sunrise drifted {drift_minutes:.1} minutes from reference"),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use panchangam_core::types::{CalendarSystem, Hora, Paksha};

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn sample_tithi() -> Tithi {
        Tithi {
            number: 8,
            name: "Ashtami (Shukla)",
            category: TithiCategory::Jaya,
            paksha: Paksha::Shukla,
            paksha_day: 8,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            moon_sun_separation: 90.0,
            calendar_system: CalendarSystem::Purnimanta,
        }
    }

    #[test]
    fn valid_tithi_has_no_violations() {
        assert!(validate_tithi(&sample_tithi()).is_empty());
    }

    #[test]
    fn tithi_with_mismatched_category_is_flagged() {
        let mut tithi = sample_tithi();
        tithi.category = TithiCategory::Nanda;
        assert!(!validate_tithi(&tithi).is_empty());
    }

    #[test]
    fn position_with_unnormalised_longitude_is_flagged() {
        let position = Position { longitude: 400.0, latitude: 0.0, distance: 1.0, speed: 1.0 };
        assert!(!validate_position(&position).is_empty());
    }

    #[test]
    fn karana_vishti_flag_must_match_number() {
        let karana = Karana {
            number: 8,
            name: "Vishti",
            kind: KaranaKind::Movable,
            is_vishti: false,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            parent_tithi: 5,
            half: 2,
            duration_hours: 12.4,
        };
        assert!(!validate_karana(&karana).is_empty());
    }

    #[test]
    fn vara_with_hora_out_of_range_is_flagged() {
        let vara = Vara {
            number: 4,
            name: "Budhavara",
            lord: "Budha",
            gregorian_day: "Wed".to_string(),
            is_auspicious: true,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            current_hora: Hora { number: 30, planet: "Budha", start: noon(2020, 1, 1), end: noon(2020, 1, 1) },
        };
        assert!(!validate_vara(&vara).is_empty());
    }

    #[test]
    fn drift_within_tolerance_passes() {
        let tithi = sample_tithi();
        let nakshatra = Nakshatra {
            number: 1,
            name: "Ashwini",
            deity: "Ashwini Kumaras",
            lord: "Ketu",
            symbol: "Horse's head",
            pada: 1,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            moon_longitude: 5.0,
        };
        let yoga = Yoga {
            number: 1,
            name: "Vishkambha",
            quality: panchangam_core::types::YogaQuality::Inauspicious,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            combined_value: 10.0,
        };
        let sun_times = SunTimes { sunrise: noon(2020, 1, 1), sunset: noon(2020, 1, 1), kind: DayKind::Normal };
        let reference = ReferenceValues {
            moon_sun_separation: Some(90.3),
            moon_longitude: Some(5.2),
            combined_value: Some(10.1),
            sunrise: Some(noon(2020, 1, 1)),
        };
        let errors = check_drift(&tithi, &nakshatra, &yoga, &sun_times, &reference, &DriftTolerance::default());
        assert!(errors.is_empty());
    }

    #[test]
    fn drift_beyond_tolerance_is_flagged() {
        let tithi = sample_tithi();
        let nakshatra = Nakshatra {
            number: 1,
            name: "Ashwini",
            deity: "Ashwini Kumaras",
            lord: "Ketu",
            symbol: "Horse's head",
            pada: 1,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            moon_longitude: 5.0,
        };
        let yoga = Yoga {
            number: 1,
            name: "Vishkambha",
            quality: panchangam_core::types::YogaQuality::Inauspicious,
            start: noon(2020, 1, 1),
            end: noon(2020, 1, 2),
            combined_value: 10.0,
        };
        let sun_times = SunTimes { sunrise: noon(2020, 1, 1), sunset: noon(2020, 1, 1), kind: DayKind::Normal };
        let reference = ReferenceValues {
            moon_sun_separation: Some(120.0),
            ..Default::default()
        };
        let errors = check_drift(&tithi, &nakshatra, &yoga, &sun_times, &reference, &DriftTolerance::default());
        assert_eq!(errors.len(), 1);
    }
}
