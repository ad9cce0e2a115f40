//! Shared hour-angle rise/set solver. Sun and Moon both reduce to: given a
//! declination, a transit time (in UTC decimal hours), and a depression
//! angle, find rise and set as UTC decimal-hour offsets from transit.

use panchangam_core::types::DayKind;

pub struct HourAngleResult {
    pub kind: DayKind,
    /// Only meaningful when `kind == Normal`; hour angle in degrees.
    pub hour_angle_deg: f64,
}

/// Solve `cos H = (cos(90 + depression) - sin(lat) sin(dec)) / (cos(lat) cos(dec))`,
/// branching into polar day/night per the documented sentinel rule.
/// `depression_deg` is the additional depression beyond the geometric
/// horizon (0.833 for the Sun: refraction + semidiameter; parallax +
/// semidiameter, about 0.375, for the Moon).
pub fn solve_hour_angle(latitude_deg: f64, declination_deg: f64, depression_deg: f64) -> HourAngleResult {
    let phi = latitude_deg.to_radians();
    let delta = declination_deg.to_radians();

    let cos_h =
        ((90.0 + depression_deg).to_radians().cos() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());

    if cos_h > 1.0 {
        HourAngleResult {
            kind: DayKind::PolarNight,
            hour_angle_deg: 0.0,
        }
    } else if cos_h < -1.0 {
        HourAngleResult {
            kind: DayKind::PolarDay,
            hour_angle_deg: 0.0,
        }
    } else {
        HourAngleResult {
            kind: DayKind::Normal,
            hour_angle_deg: cos_h.acos().to_degrees(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equatorial_declination_gives_roughly_half_day() {
        let r = solve_hour_angle(0.0, 0.0, 0.833);
        assert_eq!(r.kind, DayKind::Normal);
        assert!((r.hour_angle_deg - 90.0).abs() < 0.2);
    }

    #[test]
    fn high_latitude_summer_sun_is_polar_day() {
        // High northern latitude, Sun far north in declination: never sets.
        let r = solve_hour_angle(78.0, 23.0, 0.833);
        assert_eq!(r.kind, DayKind::PolarDay);
    }

    #[test]
    fn high_latitude_winter_sun_is_polar_night() {
        let r = solve_hour_angle(78.0, -23.0, 0.833);
        assert_eq!(r.kind, DayKind::PolarNight);
    }
}
