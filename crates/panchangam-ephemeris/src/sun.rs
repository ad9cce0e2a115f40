//! Solar longitude series shared by both providers, differing only in how
//! many terms of the equation of center are evaluated.

use panchangam_core::jd::centuries_since_j2000;
use panchangam_core::types::{normalize_degrees, Position, SolarPosition};

/// Evaluate the Sun's geocentric ecliptic longitude, distance, and mean
/// anomaly at `jd`. `terms` selects how many correction terms of the
/// equation of center to include (1..=3); see `spec.md` §4.1 for why the
/// two providers differ here.
fn solar_longitude_and_distance(jd: f64, terms: u8) -> (f64, f64, f64) {
    let t = centuries_since_j2000(jd);
    let l0 = normalize_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t);
    let m = normalize_degrees(357.52911 + 35999.05029 * t - 0.0001537 * t * t);
    let m_rad = m.to_radians();

    let mut c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin();
    if terms >= 2 {
        c += (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin();
    }
    if terms >= 3 {
        c += 0.000289 * (3.0 * m_rad).sin();
    }

    let true_longitude = normalize_degrees(l0 + c);
    let true_anomaly = m + c;

    let eccentricity = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let distance_au = 1.000001018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.to_radians().cos());

    (true_longitude, distance_au, m)
}

pub fn position(jd: f64, terms: u8) -> Position {
    let (longitude, distance, _m) = solar_longitude_and_distance(jd, terms);
    // Speed in degrees/day: the Earth-Sun system moves ~0.9856 deg/day on
    // average; a first-difference would cost another series evaluation, so
    // the mean rate is used as a low-cost estimate.
    Position::new(longitude, 0.0, distance, 360.0 / 365.25636)
}

pub fn detailed(jd: f64, terms: u8) -> SolarPosition {
    let t = centuries_since_j2000(jd);
    let (longitude, distance, mean_anomaly) = solar_longitude_and_distance(jd, terms);
    let l0 = normalize_degrees(280.46646 + 36000.76983 * t + 0.0003032 * t * t);

    let obliquity = mean_obliquity(jd);
    let lambda_rad = longitude.to_radians();
    let eps_rad = obliquity.to_radians();

    let declination = (eps_rad.sin() * lambda_rad.sin()).asin().to_degrees();
    let right_ascension =
        normalize_degrees((eps_rad.cos() * lambda_rad.sin()).atan2(lambda_rad.cos()).to_degrees());

    let equation_of_time_minutes = 4.0 * (l0 - right_ascension);
    let _ = mean_anomaly;

    // Angular diameter calibrated so the Sun's mean diameter (distance = 1 AU)
    // is 0.533 degrees.
    let angular_diameter = 0.533 / distance;

    SolarPosition {
        position: Position::new(longitude, 0.0, distance, 360.0 / 365.25636),
        right_ascension,
        declination,
        equation_of_time: equation_of_time_minutes,
        angular_diameter,
    }
}

/// Mean obliquity of the ecliptic, degrees (spec.md §4.5).
pub fn mean_obliquity(jd: f64) -> f64 {
    23.439 - 0.0000004 * (jd - panchangam_core::types::J2000_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    #[test]
    fn sun_longitude_in_range() {
        let p = position(J2000_EPOCH, 3);
        assert!((0.0..360.0).contains(&p.longitude));
    }

    #[test]
    fn sun_latitude_effectively_zero() {
        let p = position(J2000_EPOCH + 12345.0, 3);
        assert!(p.latitude.abs() < 0.01);
    }

    #[test]
    fn fewer_terms_stays_within_arcminutes() {
        let full = position(J2000_EPOCH + 5000.0, 3);
        let truncated = position(J2000_EPOCH + 5000.0, 1);
        let diff = (full.longitude - truncated.longitude).abs();
        assert!(diff < 0.05, "diff={diff} degrees");
    }
}
