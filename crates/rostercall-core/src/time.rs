//! Time normalization — raw provider timestamps to canonical instants and
//! target-timezone calendar keys.
//!
//! All calendar-day math happens in the configured target timezone, never
//! the host zone. An unparseable or missing timestamp is absence ("TBD"),
//! never an epoch default.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a raw provider timestamp into a canonical UTC instant.
///
/// Accepts RFC 3339, RFC 2822, and naive `YYYY-MM-DD HH:MM[:SS]` (with `T`
/// or space separator); naive values are interpreted in the target zone.
/// Returns `None` for anything else — callers treat that as "TBD".
pub fn canonical_time(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(raw) {
        return Some(t.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            // Ambiguous local times (DST fold) resolve to the earlier instant.
            if let Some(local) = tz.from_local_datetime(&naive).earliest() {
                return Some(local.with_timezone(&Utc));
            }
        }
    }

    None
}

/// Calendar-day key (`YYYY-MM-DD`) of an instant in the target timezone.
/// The unit of grouping and de-duplication: two instants hours apart map to
/// the same key when they share a target-zone calendar day.
pub fn day_key(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Long display date, e.g. `Sunday, March 1, 2026`. Output only.
pub fn display_date(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%A, %B %-d, %Y").to_string()
}

/// Clock display, e.g. `9:00 AM`. Output only.
pub fn display_time(t: DateTime<Utc>, tz: Tz) -> String {
    t.with_timezone(&tz).format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn test_rfc3339_parse() {
        let t = canonical_time("2026-03-01T09:00:00-05:00", New_York).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_naive_parse_uses_target_zone() {
        // 09:00 naive in New York is 14:00 UTC (EST)
        let t = canonical_time("2026-03-01 09:00:00", New_York).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_unparseable_is_absent() {
        assert!(canonical_time("", New_York).is_none());
        assert!(canonical_time("   ", New_York).is_none());
        assert!(canonical_time("not a time", New_York).is_none());
        assert!(canonical_time("13/45/9999", New_York).is_none());
    }

    #[test]
    fn test_day_key_timezone_boundary() {
        // 03:30 UTC on March 1 is still Feb 28 in New York
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 3, 30, 0).unwrap();
        assert_eq!(day_key(t, New_York), "2026-02-28");
    }

    #[test]
    fn test_day_key_stable_across_instants() {
        // Several hours apart in absolute time, same New York calendar day
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap(); // 09:00 EST
        let b = Utc.with_ymd_and_hms(2026, 3, 2, 2, 0, 0).unwrap(); // 21:00 EST Mar 1
        assert_eq!(day_key(a, New_York), day_key(b, New_York));
        assert_eq!(day_key(a, New_York), "2026-03-01");
    }

    #[test]
    fn test_display_formats() {
        let t = Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap();
        assert_eq!(display_date(t, New_York), "Sunday, March 1, 2026");
        assert_eq!(display_time(t, New_York), "9:00 AM");
    }
}
