//! Posting-window arithmetic.
//!
//! The announcement threshold for an event is its earliest service time
//! minus the configured lead. The window is one hour wide: a tick landing
//! inside `[threshold, threshold + 1h)` posts; earlier ticks wait; later
//! ticks have missed the window and the date is retired without posting, so
//! a stale roster never goes out.

use chrono::{DateTime, Duration, Utc};

/// Width of the posting window.
const WINDOW_HOURS: i64 = 1;

/// Outcome of the window check for one event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDecision {
    /// Threshold not reached yet; check again next tick.
    NotYet,
    /// Inside the window; announce now.
    Eligible,
    /// Window passed without a post; retire the date silently.
    Missed,
}

/// Decide where `now` falls relative to the event's posting window.
pub fn decide(now: DateTime<Utc>, earliest: DateTime<Utc>, lead_hours: i64) -> PostDecision {
    let threshold = earliest - Duration::hours(lead_hours);
    if now < threshold {
        PostDecision::NotYet
    } else if now < threshold + Duration::hours(WINDOW_HOURS) {
        PostDecision::Eligible
    } else {
        PostDecision::Missed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_exactly_at_threshold_is_eligible() {
        let now = event_time() - Duration::hours(24);
        assert_eq!(decide(now, event_time(), 24), PostDecision::Eligible);
    }

    #[test]
    fn test_before_threshold_waits() {
        let now = event_time() - Duration::hours(25);
        assert_eq!(decide(now, event_time(), 24), PostDecision::NotYet);
    }

    #[test]
    fn test_just_inside_window_is_eligible() {
        let now = event_time() - Duration::hours(24) + Duration::minutes(59);
        assert_eq!(decide(now, event_time(), 24), PostDecision::Eligible);
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let now = event_time() - Duration::hours(23);
        assert_eq!(decide(now, event_time(), 24), PostDecision::Missed);
    }

    #[test]
    fn test_long_past_event_is_missed() {
        let now = event_time() + Duration::days(2);
        assert_eq!(decide(now, event_time(), 24), PostDecision::Missed);
    }
}
