//! Sunrise/sunset (§4.5). Self-contained mean-element formula — a
//! deliberately simpler series than `panchangam-ephemeris`'s, since rise/
//! set only needs the Sun's apparent ecliptic longitude to within the
//! fraction of a degree that determines a few minutes of time, not the
//! Ephemeris Manager's cached/interpolated path.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use panchangam_core::jd::{civil_to_jd, days_since_j2000};
use panchangam_core::types::{normalize_degrees, DayKind, Location, SunTimes};

use crate::riseset::solve_hour_angle;

/// Standard atmospheric refraction plus the Sun's apparent semidiameter.
const SUN_DEPRESSION_DEG: f64 = 0.833;

/// Reduce an angle difference (degrees) into `(-180, 180]`, used for the
/// equation of time so `L - alpha` doesn't jump by 360 near the seam.
fn wrapped_diff(a: f64, b: f64) -> f64 {
    let mut diff = (a - b) % 360.0;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
}

struct SunMeanPosition {
    mean_longitude: f64,
    declination: f64,
    equation_of_time_minutes: f64,
}

fn sun_mean_position(jd_noon: f64) -> SunMeanPosition {
    let d = days_since_j2000(jd_noon);

    let l = normalize_degrees(280.460 + 0.9856474 * d);
    let g = normalize_degrees(357.528 + 0.9856003 * d);
    let g_rad = g.to_radians();

    let lambda = normalize_degrees(l + 1.915 * g_rad.sin() + 0.020 * (2.0 * g_rad).sin());
    let epsilon = 23.439 - 0.0000004 * d;

    let lambda_rad = lambda.to_radians();
    let eps_rad = epsilon.to_radians();

    let declination = (eps_rad.sin() * lambda_rad.sin()).asin().to_degrees();
    let right_ascension = normalize_degrees(
        (eps_rad.cos() * lambda_rad.sin()).atan2(lambda_rad.cos()).to_degrees(),
    );

    let equation_of_time_minutes = 4.0 * wrapped_diff(l, right_ascension);

    SunMeanPosition {
        mean_longitude: l,
        declination,
        equation_of_time_minutes,
    }
}

fn hours_to_instant(date: NaiveDate, decimal_hours: f64) -> DateTime<Utc> {
    let mut day_offset = 0i64;
    let mut hours = decimal_hours;
    while hours < 0.0 {
        hours += 24.0;
        day_offset -= 1;
    }
    while hours >= 24.0 {
        hours -= 24.0;
        day_offset += 1;
    }

    let total_seconds = (hours * 3600.0).round() as i64;
    let hour = (total_seconds / 3600) as u32;
    let minute = ((total_seconds % 3600) / 60) as u32;
    let second = (total_seconds % 60) as u32;

    let shifted = date + chrono::Duration::days(day_offset);
    Utc.with_ymd_and_hms(shifted.year(), shifted.month(), shifted.day(), hour, minute, second)
        .single()
        .expect("hours_to_instant produced an invalid calendar date")
}

use chrono::Datelike;

/// Compute sunrise/sunset for `date` (interpreted in UTC by the caller; the
/// caller applies its own zone shift before/after calling this) at
/// `location`.
pub fn sun_times(date: NaiveDate, location: Location) -> SunTimes {
    let noon = Utc
        .with_ymd_and_hms(date.year(), date.month(), date.day(), 12, 0, 0)
        .single()
        .expect("sun_times given an invalid calendar date");
    let jd_noon = civil_to_jd(noon);

    let sun = sun_mean_position(jd_noon);
    let result = solve_hour_angle(location.latitude(), sun.declination, SUN_DEPRESSION_DEG);

    match result.kind {
        DayKind::PolarNight => {
            let sentinel = Utc
                .with_ymd_and_hms(date.year(), date.month(), date.day(), 12, 0, 0)
                .single()
                .unwrap();
            SunTimes {
                sunrise: sentinel,
                sunset: sentinel,
                kind: DayKind::PolarNight,
            }
        }
        DayKind::PolarDay => {
            let start = Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0).single().unwrap();
            let end = Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), 23, 59, 59).single().unwrap();
            SunTimes {
                sunrise: start,
                sunset: end,
                kind: DayKind::PolarDay,
            }
        }
        DayKind::Normal => {
            let solar_noon_hours = 12.0 - location.longitude() / 15.0 - sun.equation_of_time_minutes / 60.0;
            let h_hours = result.hour_angle_deg / 15.0;
            let sunrise = hours_to_instant(date, solar_noon_hours - h_hours);
            let sunset = hours_to_instant(date, solar_noon_hours + h_hours);
            SunTimes {
                sunrise,
                sunset,
                kind: DayKind::Normal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_york_2020_01_15_is_within_fifteen_minutes() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let location = Location::new(40.7128, -74.0060).unwrap();
        let times = sun_times(date, location);
        assert_eq!(times.kind, DayKind::Normal);

        let expected_sunrise = Utc.with_ymd_and_hms(2020, 1, 15, 12, 18, 0).unwrap();
        let expected_sunset = Utc.with_ymd_and_hms(2020, 1, 15, 21, 52, 0).unwrap();
        assert!(
            (times.sunrise - expected_sunrise).num_minutes().abs() <= 15,
            "sunrise={:?}",
            times.sunrise
        );
        assert!(
            (times.sunset - expected_sunset).num_minutes().abs() <= 15,
            "sunset={:?}",
            times.sunset
        );
    }

    #[test]
    fn london_2020_01_15_is_within_fifteen_minutes() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let location = Location::new(51.5074, -0.1278).unwrap();
        let times = sun_times(date, location);

        let expected_sunrise = Utc.with_ymd_and_hms(2020, 1, 15, 7, 59, 0).unwrap();
        let expected_sunset = Utc.with_ymd_and_hms(2020, 1, 15, 16, 19, 0).unwrap();
        assert!((times.sunrise - expected_sunrise).num_minutes().abs() <= 15);
        assert!((times.sunset - expected_sunset).num_minutes().abs() <= 15);
    }

    #[test]
    fn reykjavik_summer_solstice_has_a_long_day_but_is_not_polar() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
        let location = Location::new(64.15, -21.94).unwrap();
        let times = sun_times(date, location);
        assert_eq!(times.kind, DayKind::Normal);
        let day_length = times.sunset - times.sunrise;
        assert!(day_length.num_minutes() > 20 * 60, "day_length={day_length:?}");
    }

    #[test]
    fn longyearbyen_winter_solstice_is_polar_night() {
        let date = NaiveDate::from_ymd_opt(2020, 12, 21).unwrap();
        let location = Location::new(78.92, 11.95).unwrap();
        let times = sun_times(date, location);
        assert_eq!(times.kind, DayKind::PolarNight);
        assert_eq!(times.sunrise, times.sunset);
    }

    #[test]
    fn sunrise_precedes_sunset_in_the_normal_case() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 20).unwrap();
        let location = Location::new(10.0, 77.0).unwrap();
        let times = sun_times(date, location);
        assert_eq!(times.kind, DayKind::Normal);
        assert!(times.sunrise < times.sunset);
    }
}
