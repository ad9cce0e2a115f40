//! Day-Period Partitioner (component C7).
//!
//! Divides the solar day `[sunrise, sunset]` into the 8 parts classical
//! muhurta tables index into (Rahu Kalam, Yamagandam, Gulika Kalam) and into
//! 30 equal muhurtas for the Abhijit special case. Every table here is
//! reproduced bit-for-bit from the legacy weekday mapping the spec calls
//! out, not re-derived from a classical reference — see `DESIGN.md`.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Utc, Weekday};

use panchangam_core::types::DayPeriod;

/// Weekday-indexed part number (1..=8), ordered Sunday..Saturday to match
/// `Weekday::num_days_from_sunday`.
const RAHU_KALAM_TABLE: [u8; 7] = [7, 1, 6, 4, 3, 2, 5];
const YAMAGANDAM_TABLE: [u8; 7] = [4, 3, 2, 1, 7, 6, 5];
const GULIKA_KALAM_TABLE: [u8; 7] = [7, 6, 5, 4, 3, 2, 1];

fn table_index(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

/// One of the 8 equal day-parts, `part_number` in `[1, 8]`.
fn nth_part(sunrise: DateTime<Utc>, part_duration: ChronoDuration, part_number: u8) -> DayPeriod {
    let start = sunrise + part_duration * (part_number as i32 - 1);
    let end = start + part_duration;
    DayPeriod {
        start,
        end,
        duration_minutes: part_duration.num_seconds() as f64 / 60.0,
        is_auspicious: false,
    }
}

/// Rahu Kalam, Yamagandam, and Gulika Kalam for the civil day running
/// `[sunrise, sunset]`, all traditionally inauspicious.
pub fn inauspicious_periods(sunrise: DateTime<Utc>, sunset: DateTime<Utc>, weekday: Weekday) -> (DayPeriod, DayPeriod, DayPeriod) {
    let span = sunset - sunrise;
    let part_duration = span / 8;
    let idx = table_index(weekday);

    let rahu = nth_part(sunrise, part_duration, RAHU_KALAM_TABLE[idx]);
    let yama = nth_part(sunrise, part_duration, YAMAGANDAM_TABLE[idx]);
    let gulika = nth_part(sunrise, part_duration, GULIKA_KALAM_TABLE[idx]);

    (rahu, yama, gulika)
}

/// Abhijit Muhurta: the 8th of 30 equal muhurtas between sunrise and
/// sunset. Flagged not auspicious (but still returned) when its start
/// falls after local 12:30 on the same civil date.
pub fn abhijit_muhurta(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> DayPeriod {
    let span = sunset - sunrise;
    let muhurta_duration = span / 30;
    let start = sunrise + muhurta_duration * 7;
    let end = start + muhurta_duration;

    let noon_cutoff = sunrise
        .date_naive()
        .and_hms_opt(12, 30, 0)
        .expect("12:30 is always a valid time")
        .and_utc();

    DayPeriod {
        start,
        end,
        duration_minutes: muhurta_duration.num_seconds() as f64 / 60.0,
        is_auspicious: start <= noon_cutoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_day() -> (DateTime<Utc>, DateTime<Utc>) {
        let sunrise = Utc.with_ymd_and_hms(2020, 1, 15, 6, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2020, 1, 15, 18, 0, 0).unwrap();
        (sunrise, sunset)
    }

    #[test]
    fn eight_parts_span_sunrise_to_sunset() {
        let (sunrise, sunset) = sample_day();
        let (rahu, yama, gulika) = inauspicious_periods(sunrise, sunset, Weekday::Wed);
        for p in [&rahu, &yama, &gulika] {
            assert!(p.start >= sunrise);
            assert!(p.end <= sunset);
            assert!((p.duration_minutes - 90.0).abs() < 1e-6);
        }
    }

    #[test]
    fn wednesday_matches_the_documented_table() {
        let (sunrise, sunset) = sample_day();
        let (rahu, yama, gulika) = inauspicious_periods(sunrise, sunset, Weekday::Wed);
        let part = (sunset - sunrise) / 8;
        assert_eq!(rahu.start, sunrise + part * 3);
        assert_eq!(yama.start, sunrise + part * 0);
        assert_eq!(gulika.start, sunrise + part * 3);
    }

    #[test]
    fn sunday_matches_the_documented_table() {
        let (sunrise, sunset) = sample_day();
        let (rahu, yama, gulika) = inauspicious_periods(sunrise, sunset, Weekday::Sun);
        let part = (sunset - sunrise) / 8;
        assert_eq!(rahu.start, sunrise + part * 6);
        assert_eq!(yama.start, sunrise + part * 3);
        assert_eq!(gulika.start, sunrise + part * 6);
    }

    #[test]
    fn abhijit_is_the_eighth_of_thirty_muhurtas() {
        let (sunrise, sunset) = sample_day();
        let muhurta = (sunset - sunrise) / 30;
        let abhijit = abhijit_muhurta(sunrise, sunset);
        assert_eq!(abhijit.start, sunrise + muhurta * 7);
        assert_eq!(abhijit.end, abhijit.start + muhurta);
    }

    #[test]
    fn abhijit_after_1230_is_flagged_inauspicious() {
        let sunrise = Utc.with_ymd_and_hms(2020, 6, 21, 10, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2020, 6, 21, 22, 0, 0).unwrap();
        let abhijit = abhijit_muhurta(sunrise, sunset);
        assert!(abhijit.start > Utc.with_ymd_and_hms(2020, 6, 21, 12, 30, 0).unwrap());
        assert!(!abhijit.is_auspicious);
    }
}
