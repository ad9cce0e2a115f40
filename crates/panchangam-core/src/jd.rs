//! Julian Day conversions.
//!
//! Uses the proleptic Gregorian calendar throughout — the 1582 cutover is
//! disabled, so JDs stay continuous for any `DateTime<Utc>` `chrono` can
//! represent. Based on the Meeus algorithm (Jean Meeus, "Astronomical
//! Algorithms", ch. 7), not the truncated single-term formula some
//! lightweight Panchanga implementations use, so that round-tripping a
//! civil instant through JD and back holds to second precision.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::types::J2000_EPOCH;

/// Convert a UTC instant to a continuous Julian Day.
pub fn civil_to_jd(instant: DateTime<Utc>) -> f64 {
    let mut year = instant.year() as f64;
    let mut month = instant.month() as f64;
    let day = instant.day() as f64
        + instant.hour() as f64 / 24.0
        + instant.minute() as f64 / 1440.0
        + instant.second() as f64 / 86400.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Convert a continuous Julian Day back to a UTC instant, to second
/// precision.
pub fn jd_to_civil(jd: f64) -> DateTime<Utc> {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;

    // Always apply the Gregorian reduction, matching `civil_to_jd`'s
    // unconditional Gregorian `b` correction — the 1582 cutover stays
    // disabled so JDs round-trip for any date this crate can represent.
    let alpha = ((z - 1867216.25) / 36524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_with_frac = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    let day = day_with_frac.floor();
    let mut frac_day = day_with_frac - day;

    // Round to the nearest second to avoid drift from floating point noise.
    let total_seconds = (frac_day * 86400.0).round() as i64;
    let (mut day, hour, minute, second) = {
        let mut secs = total_seconds;
        let mut day = day as i64;
        if secs >= 86400 {
            secs -= 86400;
            day += 1;
        }
        let hour = secs / 3600;
        let minute = (secs % 3600) / 60;
        let second = secs % 60;
        (day, hour, minute, second)
    };
    frac_day = 0.0; // silence unused-assignment warning on some toolchains
    let _ = frac_day;
    if day == 0 {
        day = 1;
    }

    Utc.with_ymd_and_hms(year as i32, month as u32, day as u32, hour as u32, minute as u32, second as u32)
        .single()
        .expect("jd_to_civil produced an invalid calendar date")
}

/// Days since the J2000.0 epoch (`jd - 2451545.0`), the reduced time
/// variable every ephemeris provider's mean-element series is built on.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_EPOCH
}

/// Julian centuries since J2000.0, used by higher-order solar terms.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    days_since_j2000(jd) / 36525.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch_is_exact() {
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = civil_to_jd(instant);
        assert!((jd - J2000_EPOCH).abs() < 1e-6, "jd={jd}");
    }

    #[test]
    fn round_trip_to_second_precision() {
        let cases = [
            Utc.with_ymd_and_hms(2020, 1, 15, 12, 18, 0).unwrap(),
            Utc.with_ymd_and_hms(1991, 8, 13, 8, 1, 0).unwrap(),
            Utc.with_ymd_and_hms(1582, 10, 4, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2451, 6, 30, 23, 59, 59).unwrap(),
        ];
        for instant in cases {
            let jd = civil_to_jd(instant);
            let back = jd_to_civil(jd);
            assert_eq!(instant, back, "round-trip failed for {instant}");
        }
    }

    #[test]
    fn jd_is_continuous_across_gregorian_cutover() {
        let before = civil_to_jd(Utc.with_ymd_and_hms(1582, 10, 4, 0, 0, 0).unwrap());
        let after = civil_to_jd(Utc.with_ymd_and_hms(1582, 10, 5, 0, 0, 0).unwrap());
        assert!((after - before - 1.0).abs() < 1e-6);
    }
}
