//! Zone-offset resolution.
//!
//! This is a thin boundary adapter, not a timezone database: it resolves a
//! zone string to a fixed UTC offset for a *caller-supplied, already
//! zone-resolved* civil instant. It does not know about DST transitions or
//! historical offset changes — per the spec, callers pass a resolved
//! civil-date-in-zone and historical tz data is explicitly out of scope.

use chrono::FixedOffset;

use crate::error::{PanchangamError, PanchangamResult};

const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

/// A handful of common IANA identifiers, resolved to their *standard*
/// (non-DST) offset. Anything else must be passed as an explicit `±HH[:MM]`
/// offset — this is intentionally small; a full IANA database is a caller
/// concern.
fn known_iana_offset_seconds(name: &str) -> Option<i32> {
    let hours = match name {
        "Asia/Kolkata" | "Asia/Calcutta" => 5.5,
        "Asia/Kathmandu" => 5.75,
        "Asia/Tokyo" => 9.0,
        "Asia/Shanghai" | "Asia/Hong_Kong" => 8.0,
        "Asia/Dubai" => 4.0,
        "Europe/London" => 0.0,
        "Europe/Paris" | "Europe/Berlin" => 1.0,
        "Europe/Moscow" => 3.0,
        "America/New_York" => -5.0,
        "America/Chicago" => -6.0,
        "America/Denver" => -7.0,
        "America/Los_Angeles" => -8.0,
        "Pacific/Honolulu" => -10.0,
        "Australia/Sydney" => 10.0,
        "Atlantic/Reykjavik" => 0.0,
        "Arctic/Longyearbyen" | "Europe/Oslo" => 1.0,
        _ => return None,
    };
    Some((hours * 3600.0).round() as i32)
}

/// Parse an explicit `±HH[:MM]` offset, optionally prefixed by `UTC`/`GMT`.
fn parse_fixed_offset(raw: &str) -> Option<i32> {
    let stripped = raw
        .strip_prefix("UTC")
        .or_else(|| raw.strip_prefix("GMT"))
        .unwrap_or(raw);
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Some(0);
    }
    let (sign, rest) = match stripped.chars().next()? {
        '+' => (1, &stripped[1..]),
        '-' => (-1, &stripped[1..]),
        _ => return None,
    };
    let mut parts = rest.splitn(2, ':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    Some(sign * (hours * 3600 + minutes * 60))
}

/// Resolve a zone string into a fixed UTC offset.
///
/// Empty string means UTC. An unrecognised zone is a hard error — there is
/// no silent fallback to UTC.
pub fn resolve_offset(zone: &str) -> PanchangamResult<FixedOffset> {
    let trimmed = zone.trim();

    let seconds = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("gmt") {
        0
    } else if let Some(s) = known_iana_offset_seconds(trimmed) {
        s
    } else if let Some(s) = parse_fixed_offset(trimmed) {
        s
    } else {
        return Err(PanchangamError::validation(
            "panchangam-core",
            "resolve_offset",
            format!("unrecognised zone identifier: {trimmed}"),
        )
        .with_extra("field", "zone"));
    };

    if seconds.abs() > MAX_OFFSET_SECONDS {
        return Err(PanchangamError::validation(
            "panchangam-core",
            "resolve_offset",
            format!("zone offset {seconds}s exceeds +/-14:00"),
        )
        .with_extra("field", "zone"));
    }

    FixedOffset::east_opt(seconds).ok_or_else(|| {
        PanchangamError::internal("panchangam-core", "resolve_offset", "FixedOffset construction failed")
    })
}

/// Render a `FixedOffset` as `"+HH:MM"` / `"-HH:MM"`.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total_minutes = offset.local_minus_utc() / 60;
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let total_minutes = total_minutes.abs();
    format!("{sign}{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_zone_is_utc() {
        let o = resolve_offset("").unwrap();
        assert_eq!(o.local_minus_utc(), 0);
    }

    #[test]
    fn known_iana_zone_resolves() {
        let o = resolve_offset("Asia/Kolkata").unwrap();
        assert_eq!(o.local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn explicit_offset_with_utc_prefix() {
        let o = resolve_offset("UTC+05:30").unwrap();
        assert_eq!(o.local_minus_utc(), 5 * 3600 + 1800);
    }

    #[test]
    fn explicit_negative_offset_without_minutes() {
        let o = resolve_offset("-8").unwrap();
        assert_eq!(o.local_minus_utc(), -8 * 3600);
    }

    #[test]
    fn invalid_zone_is_hard_error() {
        assert!(resolve_offset("Not/AZone").is_err());
    }

    #[test]
    fn offset_beyond_14_hours_is_rejected() {
        assert!(resolve_offset("+15:00").is_err());
    }

    #[test]
    fn format_offset_renders_sign_and_padding() {
        let o = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(format_offset(&o), "+05:30");
        let neg = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(format_offset(&neg), "-08:00");
    }
}
