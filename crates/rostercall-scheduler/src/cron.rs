//! Lightweight cron expression parser.
//! Supports: "MIN HOUR DOM MON DOW" (5-field, no seconds)
//! Wildcards: *, */N, N, comma lists; DOW 0-7 with both 0 and 7 = Sunday.
//! Example: "0 8 * * 1" = every Monday at 8:00

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Parse a simple cron expression and compute the next run time.
pub fn next_run_from_cron(expression: &str, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = expression.split_whitespace().collect();
    if parts.len() != 5 {
        tracing::warn!(
            "Invalid cron expression: '{}' (need 5 fields: MIN HOUR DOM MON DOW)",
            expression
        );
        return None;
    }

    let minutes = parse_field(parts[0], 0, 59)?;
    let hours = parse_field(parts[1], 0, 23)?;
    let _dom = parts[2]; // Day of month (simplified: only * supported)
    let _mon = parts[3]; // Month (simplified: only * supported)
    let weekdays = parse_dow(parts[4])?;

    let mut candidate = after + Duration::minutes(1);
    candidate = candidate.with_second(0).unwrap_or(candidate);

    // A weekly schedule may be up to 8 days out.
    for _ in 0..(8 * 24 * 60) {
        if minutes.contains(&candidate.minute())
            && hours.contains(&candidate.hour())
            && weekdays.contains(&candidate.weekday().num_days_from_sunday())
        {
            return Some(candidate);
        }
        candidate += Duration::minutes(1);
    }

    None
}

/// Parse a cron field into a list of matching values.
fn parse_field(field: &str, min: u32, max: u32) -> Option<Vec<u32>> {
    if field == "*" {
        return Some((min..=max).collect());
    }

    // */N — every N
    if let Some(step) = field.strip_prefix("*/") {
        let n: u32 = step.parse().ok()?;
        if n == 0 {
            return None;
        }
        return Some((min..=max).step_by(n as usize).collect());
    }

    // Comma-separated: "0,15,30,45"
    if field.contains(',') {
        let vals: Result<Vec<u32>, _> = field.split(',').map(|s| s.trim().parse()).collect();
        return vals
            .ok()
            .map(|v| v.into_iter().filter(|x| *x >= min && *x <= max).collect());
    }

    // Single number
    let n: u32 = field.parse().ok()?;
    if n >= min && n <= max {
        Some(vec![n])
    } else {
        None
    }
}

/// Day-of-week field, 0-7 where both 0 and 7 mean Sunday.
fn parse_dow(field: &str) -> Option<Vec<u32>> {
    parse_field(field, 0, 7).map(|v| v.into_iter().map(|d| d % 7).collect())
}
