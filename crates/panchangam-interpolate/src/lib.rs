//! Interpolator (component C4).
//!
//! Produces a `Position` at an arbitrary Julian Day by sampling an
//! [`EphemerisProvider`] at bracketing integer-JD points and fitting
//! linear, Lagrange, or natural-cubic-spline models, per
//! `PanchangamConfig::interpolation`.

pub mod methods;
pub mod unwrap;

use panchangam_core::config::{InterpolationConfig, InterpolationMethod};
use panchangam_core::types::{Planet, Position};
use panchangam_core::{PanchangamError, PanchangamResult};
use panchangam_ephemeris::EphemerisProvider;

use unwrap::{rewrap_degrees, unwrap_degrees, wrapped_diff_degrees};

/// Integer-JD sample points bracketing `target_jd`, `count` of them,
/// centred as evenly as possible around the target.
fn sample_grid(target_jd: f64, count: usize) -> Vec<f64> {
    let center = target_jd.floor() as i64;
    let before = (count as i64 - 1) / 2;
    let start = center - before;
    (0..count).map(|i| (start + i as i64) as f64).collect()
}

struct Samples {
    xs: Vec<f64>,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    distance: Vec<f64>,
    speed: Vec<f64>,
}

fn gather_samples(
    provider: &dyn EphemerisProvider,
    planet: Planet,
    xs: &[f64],
) -> PanchangamResult<Samples> {
    let mut longitude = Vec::with_capacity(xs.len());
    let mut latitude = Vec::with_capacity(xs.len());
    let mut distance = Vec::with_capacity(xs.len());
    let mut speed = Vec::with_capacity(xs.len());

    for &x in xs {
        let pos = provider.position(x, planet)?;
        longitude.push(pos.longitude);
        latitude.push(pos.latitude);
        distance.push(pos.distance);
        speed.push(pos.speed);
    }

    Ok(Samples {
        xs: xs.to_vec(),
        longitude,
        latitude,
        distance,
        speed,
    })
}

/// Fit `method` over `samples` and evaluate at `target_jd`, wrapping the
/// longitude channel before fitting and rewrapping the result afterward.
fn fit(method: InterpolationMethod, samples: &Samples, target_jd: f64) -> PanchangamResult<Position> {
    let n = samples.xs.len();
    let unwrapped_longitude = unwrap_degrees(&samples.longitude);

    let evaluate = |ys: &[f64]| -> PanchangamResult<f64> {
        match method {
            InterpolationMethod::Linear => {
                if n != 2 {
                    return Err(PanchangamError::internal(
                        "panchangam-interpolate",
                        "fit",
                        format!("linear interpolation requires exactly 2 samples, got {n}"),
                    ));
                }
                Ok(methods::linear(&samples.xs, ys, target_jd))
            }
            InterpolationMethod::Lagrange => Ok(methods::lagrange(&samples.xs, ys, target_jd)),
            InterpolationMethod::CubicSpline => {
                if n < 4 {
                    Ok(methods::lagrange(&samples.xs, ys, target_jd))
                } else {
                    Ok(methods::natural_cubic_spline(&samples.xs, ys, target_jd))
                }
            }
        }
    };

    let longitude = rewrap_degrees(evaluate(&unwrapped_longitude)?);
    let latitude = evaluate(&samples.latitude)?;
    let distance = evaluate(&samples.distance)?;
    let speed = evaluate(&samples.speed)?;

    Ok(Position::new(longitude, latitude, distance, speed))
}

/// Number of grid samples a method needs, given the configured order.
fn sample_count(method: InterpolationMethod, order: u8) -> usize {
    match method {
        InterpolationMethod::Linear => 2,
        InterpolationMethod::Lagrange => order.max(2) as usize,
        InterpolationMethod::CubicSpline => (order as usize).max(4),
    }
}

/// Interpolate a single planet's position at `target_jd` using `provider`
/// as the bracketing sample source, per `config`.
pub fn interpolate(
    provider: &dyn EphemerisProvider,
    planet: Planet,
    target_jd: f64,
    config: &InterpolationConfig,
) -> PanchangamResult<Position> {
    let count = sample_count(config.method, config.order);
    let xs = sample_grid(target_jd, count);
    let samples = gather_samples(provider, planet, &xs)?;
    fit(config.method, &samples, target_jd)
}

/// Weighted interpolation error against a directly-computed reference, per
/// the validation-mode formula in the interpolator's contract:
/// `|ΔLon| + 0.5·|ΔLat| + 0.1·|ΔDist|/Dist`, with the longitude difference
/// reduced modulo 360 so differences greater than 180° wrap the short way.
pub fn weighted_error(interpolated: &Position, reference: &Position) -> f64 {
    let d_lon = wrapped_diff_degrees(interpolated.longitude, reference.longitude).abs();
    let d_lat = (interpolated.latitude - reference.latitude).abs();
    let d_dist = if reference.distance.abs() > f64::EPSILON {
        (interpolated.distance - reference.distance).abs() / reference.distance.abs()
    } else {
        0.0
    };
    d_lon + 0.5 * d_lat + 0.1 * d_dist
}

/// Interpolate at `target_jd`, then validate against the provider's direct
/// computation at that exact JD, returning `(position, error, acceptable)`.
pub fn interpolate_and_validate(
    provider: &dyn EphemerisProvider,
    planet: Planet,
    target_jd: f64,
    config: &InterpolationConfig,
) -> PanchangamResult<(Position, f64, bool)> {
    let interpolated = interpolate(provider, planet, target_jd, config)?;
    let reference = provider.position(target_jd, planet)?;
    let error = weighted_error(&interpolated, &reference);
    Ok((interpolated, error, error <= config.tolerance))
}
