//! Festival calendar — boundary adapter stub.
//!
//! Per the spec, festival calendars are "a static lookup table keyed by
//! Gregorian date and Tithi number", mentioned only as a boundary adapter.
//! This is intentionally small and non-authoritative: a handful of
//! fixed-Gregorian-date observances, enough for a caller to see the shape
//! of the adapter. It carries none of the core's correctness guarantees and
//! is not exercised by the aggregation facade.

/// A fixed-date festival lookup: (month, day) -> name.
const FIXED_DATE_FESTIVALS: &[(u32, u32, &str)] = &[
    (1, 14, "Makar Sankranti"),
    (8, 15, "Independence Day (India)"),
    (10, 2, "Gandhi Jayanti"),
];

/// Look up a festival by Gregorian (month, day). Returns `None` for any date
/// not in the small fixed table, or for Tithi-keyed festivals (new/full
/// moon observances, which vary year to year and are a caller concern).
pub fn fixed_date_festival(month: u32, day: u32) -> Option<&'static str> {
    FIXED_DATE_FESTIVALS
        .iter()
        .find(|(m, d, _)| *m == month && *d == day)
        .map(|(_, _, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fixed_date_resolves() {
        assert_eq!(fixed_date_festival(1, 14), Some("Makar Sankranti"));
    }

    #[test]
    fn unknown_date_is_none() {
        assert_eq!(fixed_date_festival(2, 29), None);
    }
}
