//! Lunar longitude series shared by both providers. The Moon's motion is
//! perturbed enough by the Sun that a single equation-of-center term is a
//! poor approximation, so this follows the truncated-series approach from
//! Meeus ch. 47: a handful of periodic terms in the four fundamental
//! arguments (mean elongation, Sun's mean anomaly, Moon's mean anomaly,
//! argument of latitude), ordered by descending amplitude so that taking a
//! prefix of the table is a meaningful truncation rather than an arbitrary
//! one.

use panchangam_core::jd::centuries_since_j2000;
use panchangam_core::types::{normalize_degrees, LunarPosition, Position};

use crate::sun::mean_obliquity;

/// One term of the longitude perturbation series: coefficients on
/// `(d, m, mp, f)` and an amplitude in degrees.
struct LongitudeTerm {
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
    amplitude: f64,
}

/// Longitude perturbation terms, descending by amplitude. The primary
/// provider sums all of them (>=8); the fallback provider sums only the
/// first three, matching the spec's minimum term counts for each tier.
const LONGITUDE_TERMS: [LongitudeTerm; 15] = [
    LongitudeTerm { d: 0.0, m: 0.0, mp: 1.0, f: 0.0, amplitude: 6.288750 },
    LongitudeTerm { d: 2.0, m: 0.0, mp: -1.0, f: 0.0, amplitude: 1.274018 },
    LongitudeTerm { d: 2.0, m: 0.0, mp: 0.0, f: 0.0, amplitude: 0.658309 },
    LongitudeTerm { d: 0.0, m: 0.0, mp: 2.0, f: 0.0, amplitude: 0.213616 },
    LongitudeTerm { d: 0.0, m: 1.0, mp: 0.0, f: 0.0, amplitude: -0.185596 },
    LongitudeTerm { d: 0.0, m: 0.0, mp: 0.0, f: 2.0, amplitude: -0.114336 },
    LongitudeTerm { d: 2.0, m: 0.0, mp: -2.0, f: 0.0, amplitude: 0.058793 },
    LongitudeTerm { d: 2.0, m: -1.0, mp: -1.0, f: 0.0, amplitude: 0.057212 },
    LongitudeTerm { d: 2.0, m: 0.0, mp: 1.0, f: 0.0, amplitude: 0.053320 },
    LongitudeTerm { d: 2.0, m: -1.0, mp: 0.0, f: 0.0, amplitude: 0.045874 },
    LongitudeTerm { d: 0.0, m: 1.0, mp: -1.0, f: 0.0, amplitude: 0.041024 },
    LongitudeTerm { d: 1.0, m: 0.0, mp: 0.0, f: 0.0, amplitude: -0.034718 },
    LongitudeTerm { d: 0.0, m: 1.0, mp: 1.0, f: 0.0, amplitude: -0.030465 },
    LongitudeTerm { d: 2.0, m: 0.0, mp: 0.0, f: -2.0, amplitude: 0.015326 },
    LongitudeTerm { d: 0.0, m: 0.0, mp: 2.0, f: 2.0, amplitude: -0.012528 },
];

struct MeanArguments {
    l_prime: f64,
    d: f64,
    m: f64,
    mp: f64,
    f: f64,
}

fn mean_arguments(t: f64) -> MeanArguments {
    MeanArguments {
        l_prime: normalize_degrees(
            218.3164477 + 481267.88123421 * t - 0.0015786 * t * t + t.powi(3) / 538841.0
                - t.powi(4) / 65194000.0,
        ),
        d: normalize_degrees(
            297.8501921 + 445267.1114034 * t - 0.0018819 * t * t + t.powi(3) / 545868.0
                - t.powi(4) / 113065000.0,
        ),
        m: normalize_degrees(357.5291092 + 35999.0502909 * t - 0.0001536 * t * t + t.powi(3) / 24490000.0),
        mp: normalize_degrees(
            134.9633964 + 477198.8675055 * t + 0.0087414 * t * t + t.powi(3) / 69699.0
                - t.powi(4) / 14712000.0,
        ),
        f: normalize_degrees(
            93.2720950 + 483202.0175233 * t - 0.0036539 * t * t - t.powi(3) / 3526000.0
                + t.powi(4) / 863310000.0,
        ),
    }
}

/// Sum the first `term_count` longitude perturbation terms on top of the
/// mean longitude, returning degrees (un-normalized offset).
fn longitude_perturbation(args: &MeanArguments, term_count: usize) -> f64 {
    LONGITUDE_TERMS
        .iter()
        .take(term_count.min(LONGITUDE_TERMS.len()))
        .map(|term| {
            let arg = term.d * args.d + term.m * args.m + term.mp * args.mp + term.f * args.f;
            term.amplitude * arg.to_radians().sin()
        })
        .sum()
}

/// Moon's mean distance from Earth, km, perturbed by a single dominant
/// distance term (the amplitude-1 term in Meeus's distance series); enough
/// to place the Moon's horizontal parallax to within a few arcseconds.
fn distance_km(args: &MeanArguments) -> f64 {
    let base = 385000.56;
    let perturbation = -20905.355 * args.mp.to_radians().cos();
    base + perturbation
}

pub fn position(jd: f64, term_count: usize) -> Position {
    let t = centuries_since_j2000(jd);
    let args = mean_arguments(t);
    let longitude = normalize_degrees(args.l_prime + longitude_perturbation(&args, term_count));
    let latitude = latitude_perturbation(&args, term_count);
    let distance_au = distance_km(&args) / 149_597_870.7;

    // Mean lunar motion, degrees/day; used as a speed estimate rather than
    // differencing the series at jd +/- dt.
    let speed = 13.176396;

    Position::new(longitude, latitude, distance_au, speed)
}

/// A single dominant latitude term (out of Meeus's ~60), enough for a
/// non-zero but small lunar ecliptic latitude (max ~5.13 degrees).
fn latitude_perturbation(args: &MeanArguments, term_count: usize) -> f64 {
    if term_count == 0 {
        return 0.0;
    }
    5.128122 * args.f.to_radians().sin()
}

pub fn detailed(jd: f64, term_count: usize) -> LunarPosition {
    let t = centuries_since_j2000(jd);
    let args = mean_arguments(t);
    let pos = position(jd, term_count);
    let distance_km_value = distance_km(&args);

    let eps_rad = mean_obliquity(jd).to_radians();
    let lambda_rad = pos.longitude.to_radians();
    let beta_rad = pos.latitude.to_radians();

    let declination = (beta_rad.sin() * eps_rad.cos() + beta_rad.cos() * eps_rad.sin() * lambda_rad.sin())
        .asin()
        .to_degrees();
    let right_ascension = normalize_degrees(
        (lambda_rad.sin() * eps_rad.cos() - beta_rad.tan() * eps_rad.sin())
            .atan2(lambda_rad.cos())
            .to_degrees(),
    );

    // Mean elongation from the Sun stands in for the full geocentric phase
    // angle, which would otherwise require the Sun's distance as well; this
    // is adequate to a few percent, consistent with the rest of this series.
    let elongation = normalize_degrees(args.d);
    let phase_angle = if elongation <= 180.0 {
        180.0 - elongation
    } else {
        elongation - 180.0
    };
    let illumination_fraction = (1.0 - elongation.to_radians().cos()) / 2.0;

    // Angular diameter calibrated so the Moon's mean diameter at its mean
    // distance (385000.56 km) is 0.5181 degrees.
    let angular_diameter = 0.5181 * (385000.56 / distance_km_value);

    LunarPosition {
        position: pos,
        right_ascension,
        declination,
        phase_angle,
        illumination_fraction,
        angular_diameter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    #[test]
    fn moon_longitude_in_range() {
        let p = position(J2000_EPOCH, 8);
        assert!((0.0..360.0).contains(&p.longitude));
    }

    #[test]
    fn fallback_term_count_differs_but_is_close() {
        let primary = position(J2000_EPOCH + 3000.0, 8);
        let fallback = position(J2000_EPOCH + 3000.0, 3);
        let diff = (primary.longitude - fallback.longitude).abs();
        assert!(diff < 1.5, "diff={diff}");
    }

    #[test]
    fn latitude_within_inclination_bound() {
        let p = position(J2000_EPOCH + 7777.0, 8);
        assert!(p.latitude.abs() <= 5.3);
    }

    #[test]
    fn illuminated_fraction_is_bounded() {
        let d = detailed(J2000_EPOCH + 100.0, 8);
        assert!((0.0..=1.0).contains(&d.illumination_fraction));
    }
}
