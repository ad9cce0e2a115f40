//! Panchangam Element Calculators (component C6).
//!
//! Each calculator is a pure function over longitudes (and, for Vara/Hora,
//! rise times): Tithi, Nakshatra, Yoga, Karana, Vara, Hora. Timing windows
//! are estimated from each element's average duration, centred on the
//! reference instant using the fractional part of the element's continuous
//! index — the same instant that feeds the longitudes in the first place.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Utc};

use panchangam_core::types::{
    normalize_degrees, CalendarSystem, Hora, Karana, KaranaKind, Nakshatra, Paksha, Tithi,
    TithiCategory, Vara, Yoga, YogaQuality,
};

const TITHI_DURATION_HOURS: f64 = 24.79;
const NAKSHATRA_DURATION_HOURS: f64 = 27.32;
const YOGA_DURATION_HOURS: f64 = 24.79;
const KARANA_DURATION_HOURS: f64 = 12.4;

const TITHI_NAMES: [&str; 30] = [
    "Pratipada (Shukla)",
    "Dwitiya (Shukla)",
    "Tritiya (Shukla)",
    "Chaturthi (Shukla)",
    "Panchami (Shukla)",
    "Shashthi (Shukla)",
    "Saptami (Shukla)",
    "Ashtami (Shukla)",
    "Navami (Shukla)",
    "Dashami (Shukla)",
    "Ekadashi (Shukla)",
    "Dwadashi (Shukla)",
    "Trayodashi (Shukla)",
    "Chaturdashi (Shukla)",
    "Purnima",
    "Pratipada (Krishna)",
    "Dwitiya (Krishna)",
    "Tritiya (Krishna)",
    "Chaturthi (Krishna)",
    "Panchami (Krishna)",
    "Shashthi (Krishna)",
    "Saptami (Krishna)",
    "Ashtami (Krishna)",
    "Navami (Krishna)",
    "Dashami (Krishna)",
    "Ekadashi (Krishna)",
    "Dwadashi (Krishna)",
    "Trayodashi (Krishna)",
    "Chaturdashi (Krishna)",
    "Amavasya",
];

const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

const NAKSHATRA_DEITIES: [&str; 27] = [
    "Ashwini Kumaras",
    "Yama",
    "Agni",
    "Brahma",
    "Soma",
    "Rudra",
    "Aditi",
    "Brihaspati",
    "Nagas",
    "Pitris",
    "Bhaga",
    "Aryaman",
    "Savitar",
    "Tvashtar",
    "Vayu",
    "Indra-Agni",
    "Mitra",
    "Indra",
    "Nirriti",
    "Apas",
    "Vishwadevas",
    "Vishnu",
    "Vasus",
    "Varuna",
    "Aja Ekapada",
    "Ahir Budhnya",
    "Pushan",
];

const NAKSHATRA_LORDS: [&str; 27] = [
    "Ketu", "Shukra", "Surya", "Chandra", "Mangala", "Rahu", "Guru", "Shani", "Budha", "Ketu",
    "Shukra", "Surya", "Chandra", "Mangala", "Rahu", "Guru", "Shani", "Budha", "Ketu", "Shukra",
    "Surya", "Chandra", "Mangala", "Rahu", "Guru", "Shani", "Budha",
];

const NAKSHATRA_SYMBOLS: [&str; 27] = [
    "Horse's head",
    "Yoni",
    "Razor",
    "Chariot",
    "Deer's head",
    "Teardrop",
    "Bow and quiver",
    "Cow's udder",
    "Coiled serpent",
    "Royal throne",
    "Front legs of a bed",
    "Back legs of a bed",
    "Hand",
    "Bright jewel",
    "Young shoot of a plant",
    "Triumphal archway",
    "Lotus",
    "Circular amulet",
    "Bunch of roots",
    "Elephant tusk",
    "Planks of a bed",
    "Ear",
    "Drum",
    "Empty circle",
    "Front legs of a funeral cot",
    "Back legs of a funeral cot",
    "Fish",
];

const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shoola",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

const YOGA_QUALITIES: [YogaQuality; 27] = [
    YogaQuality::Inauspicious, // Vishkambha
    YogaQuality::Auspicious,   // Priti
    YogaQuality::Auspicious,   // Ayushman
    YogaQuality::Auspicious,   // Saubhagya
    YogaQuality::Auspicious,   // Shobhana
    YogaQuality::Inauspicious, // Atiganda
    YogaQuality::Auspicious,   // Sukarma
    YogaQuality::Auspicious,   // Dhriti
    YogaQuality::Inauspicious, // Shoola
    YogaQuality::Inauspicious, // Ganda
    YogaQuality::Auspicious,   // Vriddhi
    YogaQuality::Auspicious,   // Dhruva
    YogaQuality::Inauspicious, // Vyaghata
    YogaQuality::Auspicious,   // Harshana
    YogaQuality::Inauspicious, // Vajra
    YogaQuality::Auspicious,   // Siddhi
    YogaQuality::Inauspicious, // Vyatipata
    YogaQuality::Neutral,      // Variyan
    YogaQuality::Inauspicious, // Parigha
    YogaQuality::Auspicious,   // Shiva
    YogaQuality::Neutral,      // Siddha
    YogaQuality::Neutral,      // Sadhya
    YogaQuality::Auspicious,   // Shubha
    YogaQuality::Auspicious,   // Shukla
    YogaQuality::Auspicious,   // Brahma
    YogaQuality::Auspicious,   // Indra
    YogaQuality::Inauspicious, // Vaidhriti
];

/// Karana names indexed by Karana number (1..=11), matching this spec's
/// placement — Kintughna is the first Movable Karana, not a special one.
const KARANA_NAMES: [&str; 11] = [
    "Kintughna",
    "Bava",
    "Balava",
    "Kaulava",
    "Taitila",
    "Garaja",
    "Vanija",
    "Vishti",
    "Shakuni",
    "Chatushpada",
    "Naga",
];

const VARA_NAMES: [&str; 7] = [
    "Ravivara", "Somavara", "Mangalavara", "Budhavara", "Guruvara", "Shukravara", "Shanivara",
];

const VARA_LORDS: [&str; 7] = ["Surya", "Chandra", "Mangala", "Budha", "Guru", "Shukra", "Shani"];

/// Fixed Chaldean planetary-hour sequence; wraps indefinitely.
const CHALDEAN_SEQUENCE: [&str; 7] = ["Surya", "Shukra", "Budha", "Chandra", "Shani", "Guru", "Mangala"];

/// Window `[start, end]` of `duration_hours` centred on `reference` such
/// that `reference` sits `continuous_index.fract()` of the way through it —
/// the element's "fractional part of the index" placement rule.
fn centred_window(
    reference: DateTime<Utc>,
    continuous_index: f64,
    duration_hours: f64,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let frac = continuous_index.fract().abs();
    let duration = ChronoDuration::milliseconds((duration_hours * 3_600_000.0) as i64);
    let elapsed = ChronoDuration::milliseconds((frac * duration_hours * 3_600_000.0) as i64);
    let start = reference - elapsed;
    (start, start + duration)
}

/// `diff = (moonLong - sunLong) mod 360`, the quantity every Tithi/Karana
/// calculation starts from.
pub fn moon_sun_separation(moon_longitude: f64, sun_longitude: f64) -> f64 {
    normalize_degrees(moon_longitude - sun_longitude)
}

pub fn tithi(
    moon_longitude: f64,
    sun_longitude: f64,
    reference: DateTime<Utc>,
    calendar_system: CalendarSystem,
) -> Tithi {
    let diff = moon_sun_separation(moon_longitude, sun_longitude);
    let continuous = diff / 12.0;
    let number = ((continuous.floor() as i32) + 1).clamp(1, 30) as u8;

    let paksha = if number <= 15 { Paksha::Shukla } else { Paksha::Krishna };
    let paksha_day = if number <= 15 { number } else { number - 15 };

    let category = match paksha_day % 15 {
        1 | 6 | 11 => TithiCategory::Nanda,
        2 | 7 | 12 => TithiCategory::Bhadra,
        3 | 8 | 13 => TithiCategory::Jaya,
        4 | 9 | 14 => TithiCategory::Rikta,
        _ => TithiCategory::Purna,
    };

    let (start, end) = centred_window(reference, continuous, TITHI_DURATION_HOURS);

    Tithi {
        number,
        name: TITHI_NAMES[(number - 1) as usize],
        category,
        paksha,
        paksha_day,
        start,
        end,
        moon_sun_separation: diff,
        calendar_system,
    }
}

pub fn nakshatra(moon_longitude: f64, reference: DateTime<Utc>) -> Nakshatra {
    let span = 360.0 / 27.0;
    let continuous = moon_longitude / span;
    let number = ((continuous.floor() as i32) + 1).clamp(1, 27) as u8;

    let start_deg = (number - 1) as f64 * span;
    let position_in_nakshatra = moon_longitude - start_deg;
    let pada = ((position_in_nakshatra / (span / 4.0)).floor() as i32 + 1).clamp(1, 4) as u8;

    let (start, end) = centred_window(reference, continuous, NAKSHATRA_DURATION_HOURS);

    let idx = (number - 1) as usize;
    Nakshatra {
        number,
        name: NAKSHATRA_NAMES[idx],
        deity: NAKSHATRA_DEITIES[idx],
        lord: NAKSHATRA_LORDS[idx],
        symbol: NAKSHATRA_SYMBOLS[idx],
        pada,
        start,
        end,
        moon_longitude,
    }
}

pub fn yoga(sun_longitude: f64, moon_longitude: f64, reference: DateTime<Utc>) -> Yoga {
    let combined = normalize_degrees(sun_longitude + moon_longitude);
    let span = 360.0 / 27.0;
    let continuous = combined / span;
    let number = ((continuous.floor() as i32) + 1).clamp(1, 27) as u8;

    let (start, end) = centred_window(reference, continuous, YOGA_DURATION_HOURS);

    let idx = (number - 1) as usize;
    Yoga {
        number,
        name: YOGA_NAMES[idx],
        quality: YOGA_QUALITIES[idx],
        start,
        end,
        combined_value: combined,
    }
}

/// Karana is derived from the Tithi, not directly from longitudes, to
/// preserve the invariant "two Karanas per Tithi".
pub fn karana(tithi_number: u8, diff: f64, reference: DateTime<Utc>) -> Karana {
    let position_in_tithi = diff - (tithi_number as f64 - 1.0) * 12.0;
    let half: u8 = if position_in_tithi < 6.0 { 1 } else { 2 };

    let index: u8 = match (tithi_number, half) {
        (30, 1) => 9,
        (30, 2) => 10,
        (1, 1) => 11,
        (1, 2) => 1,
        (n, h) if (2..=29).contains(&n) => {
            let pos = (n as i32 - 2) * 2 + (h as i32 - 1);
            ((pos.rem_euclid(8)) + 1) as u8
        }
        _ => unreachable!("tithi_number is always in [1, 30]"),
    };

    let kind = if index >= 9 { KaranaKind::Fixed } else { KaranaKind::Movable };
    let is_vishti = index == 8;

    let half_continuous = (position_in_tithi.rem_euclid(6.0)) / 6.0;
    let (start, end) = centred_window(reference, half_continuous, KARANA_DURATION_HOURS);

    Karana {
        number: index,
        name: KARANA_NAMES[(index - 1) as usize],
        kind,
        is_vishti,
        start,
        end,
        parent_tithi: tithi_number,
        half,
        duration_hours: KARANA_DURATION_HOURS,
    }
}

/// Planet ruling hora `n` (1-based) of a day whose Vara lord is `day_lord`,
/// following the fixed Chaldean sequence starting from that lord.
fn hora_planet(day_lord: &str, n: u8) -> &'static str {
    let start = CHALDEAN_SEQUENCE
        .iter()
        .position(|&p| p == day_lord)
        .unwrap_or(0);
    let idx = (start + (n as usize - 1)) % CHALDEAN_SEQUENCE.len();
    CHALDEAN_SEQUENCE[idx]
}

/// Current Hora for `instant`, given the civil day's `sunrise` and the
/// following day's `next_sunrise`.
pub fn hora_for(sunrise: DateTime<Utc>, next_sunrise: DateTime<Utc>, instant: DateTime<Utc>, day_lord: &str) -> Hora {
    let span = next_sunrise - sunrise;
    let hora_duration = span / 24;
    let elapsed = instant - sunrise;

    let number = if hora_duration.num_milliseconds() <= 0 {
        1
    } else {
        ((elapsed.num_milliseconds() / hora_duration.num_milliseconds()) + 1).clamp(1, 24) as u8
    };

    let start = sunrise + hora_duration * (number as i32 - 1);
    let end = start + hora_duration;

    Hora {
        number,
        planet: hora_planet(day_lord, number),
        start,
        end,
    }
}

/// Vara (weekday bounded by sunrise, not midnight) for the civil day running
/// `[sunrise, next_sunrise]`, with the current Hora for `reference`.
pub fn vara(sunrise: DateTime<Utc>, next_sunrise: DateTime<Utc>, reference: DateTime<Utc>) -> Vara {
    let weekday_index = sunrise.weekday().num_days_from_sunday() as usize;
    let number = (weekday_index as u8) + 1;
    let lord = VARA_LORDS[weekday_index];

    let current_hora = hora_for(sunrise, next_sunrise, reference, lord);

    // Classical weekday auspiciousness: Tuesday and Saturday are
    // traditionally considered inauspicious for new undertakings.
    let is_auspicious = !matches!(number, 3 | 7);

    Vara {
        number,
        name: VARA_NAMES[weekday_index],
        lord,
        gregorian_day: sunrise.weekday().to_string(),
        is_auspicious,
        start: sunrise,
        end: next_sunrise,
        current_hora,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn ashtami_scenario_matches_the_spec_example() {
        // moonLong=190, sunLong=100 -> diff=90 -> number=8 (Ashtami), Shukla, Jaya.
        let reference = noon(2020, 1, 1);
        let t = tithi(190.0, 100.0, reference, CalendarSystem::Purnimanta);
        assert_eq!(t.number, 8);
        assert_eq!(t.paksha, Paksha::Shukla);
        assert_eq!(t.category, TithiCategory::Jaya);
    }

    #[test]
    fn tithi_number_stays_in_bounds_across_the_full_circle() {
        let reference = noon(2020, 1, 1);
        for raw in (0..3600).map(|i| i as f64 / 10.0) {
            let t = tithi(raw, 0.0, reference, CalendarSystem::Purnimanta);
            assert!((1..=30).contains(&t.number), "raw={raw} number={}", t.number);
        }
    }

    #[test]
    fn amavasya_karana_placements_match_the_spec_exactly() {
        let reference = noon(2020, 1, 1);
        let k = karana(30, 29.0 * 12.0 + 2.0, reference); // tithi 30, half 1
        assert_eq!(k.number, 9);
        assert_eq!(k.name, "Shakuni");
        assert_eq!(k.kind, KaranaKind::Fixed);

        let k = karana(30, 29.0 * 12.0 + 8.0, reference); // tithi 30, half 2
        assert_eq!(k.number, 10);
        assert_eq!(k.name, "Chatushpada");

        let k = karana(1, 2.0, reference); // tithi 1, half 1
        assert_eq!(k.number, 11);
        assert_eq!(k.name, "Naga");

        let k = karana(1, 8.0, reference); // tithi 1, half 2
        assert_eq!(k.number, 1);
        assert_eq!(k.name, "Kintughna");
    }

    #[test]
    fn karana_cycles_the_eight_movable_karanas_through_the_middle_tithis() {
        let reference = noon(2020, 1, 1);
        // Tithi 2 half 1: pos = (2-2)*2 + 0 = 0 -> index 1.
        let k = karana(2, 12.0 + 2.0, reference);
        assert_eq!(k.number, 1);
        // Tithi 2 half 2: pos = 1 -> index 2.
        let k = karana(2, 12.0 + 8.0, reference);
        assert_eq!(k.number, 2);
        assert!(!k.is_vishti);
    }

    #[test]
    fn vishti_karana_is_flagged() {
        let reference = noon(2020, 1, 1);
        // Tithi 5, half 2: pos = (5-2)*2 + (2-1) = 7 -> index 8 (Vishti).
        let k = karana(5, 4.0 * 12.0 + 8.0, reference);
        assert_eq!(k.number, 8);
        assert_eq!(k.name, "Vishti");
        assert!(k.is_vishti);
    }

    #[test]
    fn nakshatra_pada_and_bounds_are_consistent() {
        let reference = noon(2020, 1, 1);
        let n = nakshatra(5.0, reference);
        assert_eq!(n.number, 1);
        assert_eq!(n.pada, 2);
        assert_eq!(n.name, "Ashwini");
    }

    #[test]
    fn yoga_combined_value_wraps_correctly() {
        let reference = noon(2020, 1, 1);
        let y = yoga(350.0, 20.0, reference);
        assert_eq!(y.combined_value, 10.0);
        assert!((1..=27).contains(&y.number));
    }

    #[test]
    fn vara_follows_sunrise_weekday_not_midnight() {
        let sunrise = Utc.with_ymd_and_hms(2020, 1, 15, 6, 30, 0).unwrap(); // Wednesday
        let next_sunrise = Utc.with_ymd_and_hms(2020, 1, 16, 6, 31, 0).unwrap();
        let v = vara(sunrise, next_sunrise, sunrise + ChronoDuration::hours(3));
        assert_eq!(v.number, 4); // Sunday=1 -> Wednesday=4
        assert_eq!(v.lord, "Budha");
    }

    #[test]
    fn first_hora_is_ruled_by_the_day_lord() {
        let sunrise = Utc.with_ymd_and_hms(2020, 1, 19, 6, 0, 0).unwrap(); // Sunday
        let next_sunrise = Utc.with_ymd_and_hms(2020, 1, 20, 6, 0, 0).unwrap();
        let h = hora_for(sunrise, next_sunrise, sunrise, "Surya");
        assert_eq!(h.number, 1);
        assert_eq!(h.planet, "Surya");
    }

    #[test]
    fn hora_sequence_follows_the_chaldean_order() {
        let sunrise = Utc.with_ymd_and_hms(2020, 1, 19, 6, 0, 0).unwrap();
        let next_sunrise = Utc.with_ymd_and_hms(2020, 1, 20, 6, 0, 0).unwrap();
        let span = next_sunrise - sunrise;
        let hora_duration = span / 24;
        let second = hora_for(sunrise, next_sunrise, sunrise + hora_duration, "Surya");
        assert_eq!(second.number, 2);
        assert_eq!(second.planet, "Shukra");
    }
}
