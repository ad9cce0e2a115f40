//! Moonrise/moonset (§4.5). Same hour-angle shape as the Sun, but using the
//! Moon's actual computed right ascension and declination from
//! `panchangam-ephemeris` rather than an independent longitude series — the
//! geometry layer has no standalone lunar-position formula of its own.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use panchangam_core::jd::{civil_to_jd, days_since_j2000};
use panchangam_core::types::{DayKind, Location, LunarTimes};
use panchangam_ephemeris::moon::detailed as lunar_detailed;

use crate::riseset::solve_hour_angle;

/// Horizontal parallax plus angular semidiameter, the Moon's rough analogue
/// of the Sun's 0.833 degrees of atmospheric refraction and semidiameter.
const MOON_DEPRESSION_DEG: f64 = 0.375;

/// Moon's term count for rise/set: enough perturbation terms that transit
/// timing is good to a few minutes without paying for the full 15-term sum
/// every caller of this module needs.
const MOON_TERM_COUNT: usize = 8;

fn wrapped_diff(a: f64, b: f64) -> f64 {
    let mut diff = (a - b) % 360.0;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff <= -180.0 {
        diff += 360.0;
    }
    diff
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

/// Compute moonrise/moonset for `date` at `location`, following the same
/// hour-angle method as the Sun but with an equation-of-time analogue built
/// from the Moon's ecliptic longitude minus its right ascension (the Moon
/// has no conventional "equation of time", but the same `4*(L - alpha)`
/// minute conversion applies to any body's apparent vs. mean transit).
pub fn lunar_times(date: NaiveDate, location: Location) -> LunarTimes {
    let noon = Utc
        .with_ymd_and_hms(date.year(), date.month(), date.day(), 12, 0, 0)
        .single()
        .expect("lunar_times given an invalid calendar date");
    let jd_noon = civil_to_jd(noon);
    let _ = days_since_j2000(jd_noon);

    let moon = lunar_detailed(jd_noon, MOON_TERM_COUNT);
    let equation_of_time_minutes = 4.0 * wrapped_diff(moon.position.longitude, moon.right_ascension);

    let result = solve_hour_angle(location.latitude(), moon.declination, MOON_DEPRESSION_DEG);

    match result.kind {
        DayKind::PolarNight => LunarTimes {
            moonrise: None,
            moonset: None,
            is_visible: false,
        },
        DayKind::PolarDay => LunarTimes {
            moonrise: None,
            moonset: None,
            is_visible: true,
        },
        DayKind::Normal => {
            let transit_hours = 12.0 - location.longitude() / 15.0 - equation_of_time_minutes / 60.0;
            let h_hours = result.hour_angle_deg / 15.0;

            let mut naive_rise = transit_hours - h_hours;
            let naive_set = transit_hours + h_hours;
            // The Moon rises roughly 50 minutes later each day; when the
            // naive rise for today's transit falls after today's set, rise
            // actually belongs to the following day. Shift it forward by 24h
            // so moonrise < moonset holds in absolute time, per the
            // documented contract.
            if naive_rise > naive_set {
                naive_rise += 24.0;
            }

            LunarTimes {
                moonrise: Some(hours_to_instant(date, naive_rise)),
                moonset: Some(hours_to_instant(date, naive_set)),
                is_visible: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_case_produces_both_rise_and_set() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let location = Location::new(10.0, 77.0).unwrap();
        let times = lunar_times(date, location);
        assert!(times.is_visible);
        assert!(times.moonrise.is_some());
        assert!(times.moonset.is_some());
    }

    #[test]
    fn either_both_times_are_present_or_neither_is() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
        let location = Location::new(-88.0, 0.0).unwrap();
        let times = lunar_times(date, location);
        assert_eq!(times.moonrise.is_some(), times.moonset.is_some());
    }

    /// The Moon's ~50-minute daily retardation means that, over a lunar
    /// month, some civil day's naive rise falls after its naive set — the
    /// exact condition the `+= 24.0` correction in `lunar_times` exists for.
    /// Sweeping a full synodic month at a mid-latitude site pins that this
    /// contract (moonrise strictly before moonset, in absolute time) never
    /// breaks, rather than relying on one hand-picked date.
    #[test]
    fn moonrise_precedes_moonset_across_a_synodic_month() {
        let location = Location::new(13.08, 80.27).unwrap();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        for offset in 0..30 {
            let date = start + chrono::Duration::days(offset);
            let times = lunar_times(date, location);
            if let (Some(rise), Some(set)) = (times.moonrise, times.moonset) {
                assert!(rise < set, "moonrise {rise} not before moonset {set} on {date}");
            }
        }
    }
}
