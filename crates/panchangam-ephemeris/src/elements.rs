//! Mean orbital elements and truncated equation-of-center evaluation for the
//! eight non-luminary planets. The Sun and Moon get their own richer series
//! (`sun.rs`, `moon.rs`) since those are what the spec's accuracy contract
//! names explicitly; the outer planets share one generic two-body
//! approximation, evaluated identically by both providers.

use panchangam_core::jd::centuries_since_j2000 as centuries;
use panchangam_core::types::{normalize_degrees, Planet, Position};

/// Mean elements at J2000.0 and their linear rates (degrees, degrees/century)
/// plus eccentricity and semi-major axis (AU). Low-precision values in the
/// style of Meeus's planetary element tables — enough to place a planet to
/// within a fraction of a degree, which is all a truncated mean-anomaly
/// series claims to do.
struct MeanElements {
    planet: Planet,
    l0: f64,
    l0_rate: f64,
    m0: f64,
    m0_rate: f64,
    eccentricity: f64,
    semi_major_axis_au: f64,
}

const ELEMENTS: [MeanElements; 8] = [
    MeanElements {
        planet: Planet::Mercury,
        l0: 252.25084,
        l0_rate: 149474.07180,
        m0: 174.79252,
        m0_rate: 149472.51529,
        eccentricity: 0.20563,
        semi_major_axis_au: 0.38710,
    },
    MeanElements {
        planet: Planet::Venus,
        l0: 181.97973,
        l0_rate: 58519.21191,
        m0: 50.11544,
        m0_rate: 58517.80333,
        eccentricity: 0.00677,
        semi_major_axis_au: 0.72333,
    },
    MeanElements {
        planet: Planet::Mars,
        l0: 355.43300,
        l0_rate: 19141.69551,
        m0: 19.38064,
        m0_rate: 19139.85475,
        eccentricity: 0.09340,
        semi_major_axis_au: 1.52368,
    },
    MeanElements {
        planet: Planet::Jupiter,
        l0: 34.39644,
        l0_rate: 3036.30746,
        m0: 20.02006,
        m0_rate: 3034.69206,
        eccentricity: 0.04849,
        semi_major_axis_au: 5.20260,
    },
    MeanElements {
        planet: Planet::Saturn,
        l0: 49.95424,
        l0_rate: 1223.51111,
        m0: 317.02084,
        m0_rate: 1222.11494,
        eccentricity: 0.05551,
        semi_major_axis_au: 9.55491,
    },
    MeanElements {
        planet: Planet::Uranus,
        l0: 313.23810,
        l0_rate: 428.48202,
        m0: 141.04984,
        m0_rate: 428.37967,
        eccentricity: 0.04630,
        semi_major_axis_au: 19.21845,
    },
    MeanElements {
        planet: Planet::Neptune,
        l0: 304.88003,
        l0_rate: 218.45945,
        m0: 256.22834,
        m0_rate: 218.45970,
        eccentricity: 0.00899,
        semi_major_axis_au: 30.11039,
    },
    MeanElements {
        planet: Planet::Pluto,
        l0: 238.92881,
        l0_rate: 145.20780,
        m0: 14.53,
        m0_rate: 144.9600,
        eccentricity: 0.24881,
        semi_major_axis_au: 39.48168,
    },
];

/// Equation of center, degrees, up to second order in eccentricity.
/// `terms` selects how many orders to include (1 or 2); fallback-style
/// providers pass 1, higher-precision providers pass 2.
fn equation_of_center(mean_anomaly_deg: f64, eccentricity: f64, terms: u8) -> f64 {
    let m = mean_anomaly_deg.to_radians();
    let e = eccentricity;
    let mut c = (2.0 * e - 0.25 * e.powi(3)) * m.sin();
    if terms >= 2 {
        c += 1.25 * e * e * (2.0 * m).sin();
    }
    c.to_degrees()
}

/// Compute a planet's position via the generic two-body approximation.
/// `perturbation_terms` is forwarded to `equation_of_center`.
pub fn planet_position(planet: Planet, jd: f64, perturbation_terms: u8) -> Position {
    let t = centuries(jd);
    let elems = ELEMENTS
        .iter()
        .find(|e| e.planet == planet)
        .expect("planet_position called with Sun/Moon; those have dedicated modules");

    let mean_anomaly = normalize_degrees(elems.m0 + elems.m0_rate * t);
    let mean_longitude = normalize_degrees(elems.l0 + elems.l0_rate * t);
    let c = equation_of_center(mean_anomaly, elems.eccentricity, perturbation_terms);
    let true_longitude = normalize_degrees(mean_longitude + c);

    let true_anomaly = mean_anomaly + c;
    let distance = elems.semi_major_axis_au * (1.0 - elems.eccentricity * elems.eccentricity)
        / (1.0 + elems.eccentricity * true_anomaly.to_radians().cos());

    // Mean daily motion in degrees/day, used as a speed estimate; heliocentric
    // inclinations are small enough that ecliptic latitude is neglected here,
    // consistent with a low-precision mean-element series.
    let speed = elems.l0_rate / 36525.0;

    Position::new(true_longitude, 0.0, distance, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchangam_core::types::J2000_EPOCH;

    #[test]
    fn jupiter_longitude_is_normalised() {
        let p = planet_position(Planet::Jupiter, J2000_EPOCH, 2);
        assert!((0.0..360.0).contains(&p.longitude));
    }

    #[test]
    fn more_terms_changes_but_stays_close() {
        let one = planet_position(Planet::Mars, J2000_EPOCH + 10000.0, 1);
        let two = planet_position(Planet::Mars, J2000_EPOCH + 10000.0, 2);
        let diff = (one.longitude - two.longitude).abs();
        assert!(diff < 1.0, "diff={diff}");
    }
}
