//! Roster aggregation — day buckets, team partitioning, and per-slot counts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use rostercall_core::time::day_key;
use rostercall_core::types::{Assignment, AssignmentStatus, NeededSlot};

/// Which announcement section a record belongs to.
///
/// A record's team name is matched case-insensitively as a substring against
/// the configured team list (so "Security Response" joins a configured
/// "Security" group). Unmatched teams fall into a catch-all keyed by the
/// literal team name. Ordering: configured teams in configured order, then
/// catch-all teams by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeamGroup {
    /// Index into the configured team-name list.
    Configured(usize),
    /// Literal team name of an unmatched team.
    Other(String),
}

impl TeamGroup {
    /// Resolve a raw team name against the configured list.
    pub fn resolve(configured: &[String], raw_team: &str) -> TeamGroup {
        let raw_lower = raw_team.to_lowercase();
        for (i, name) in configured.iter().enumerate() {
            if raw_lower.contains(&name.to_lowercase()) {
                return TeamGroup::Configured(i);
            }
        }
        TeamGroup::Other(raw_team.to_string())
    }

    /// Display name of the section.
    pub fn display_name<'a>(&'a self, configured: &'a [String]) -> &'a str {
        match self {
            TeamGroup::Configured(i) => &configured[*i],
            TeamGroup::Other(name) => name,
        }
    }
}

/// The unit of staffing reconciliation: one team group at one service time.
/// `time` of `None` groups the timeless ("TBD") records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub group: TeamGroup,
    pub time: Option<DateTime<Utc>>,
}

impl SlotKey {
    pub fn new(configured: &[String], team: &str, time: Option<DateTime<Utc>>) -> Self {
        Self {
            group: TeamGroup::resolve(configured, team),
            time,
        }
    }
}

/// One line of the rendered roster: a real assignment or a synthesized
/// open-slot placeholder.
#[derive(Debug, Clone)]
pub enum RosterEntry {
    Assigned(Assignment),
    Open {
        team: String,
        role: String,
        time: Option<DateTime<Utc>>,
    },
}

impl RosterEntry {
    pub fn team(&self) -> &str {
        match self {
            RosterEntry::Assigned(a) => &a.team,
            RosterEntry::Open { team, .. } => team,
        }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        match self {
            RosterEntry::Assigned(a) => a.service_time,
            RosterEntry::Open { time, .. } => *time,
        }
    }
}

/// Keep only the assignments whose canonical time falls on `target_day` in
/// the target zone. Timeless records are excluded — never guessed onto a day.
pub fn assignments_for_day(
    assignments: &[Assignment],
    target_day: &str,
    tz: Tz,
) -> Vec<Assignment> {
    assignments
        .iter()
        .filter(|a| matches!(a.service_time, Some(t) if day_key(t, tz) == target_day))
        .cloned()
        .collect()
}

/// Keep only the needed slots whose canonical time falls on `target_day`.
pub fn needed_for_day(needed: &[NeededSlot], target_day: &str, tz: Tz) -> Vec<NeededSlot> {
    needed
        .iter()
        .filter(|n| matches!(n.service_time, Some(t) if day_key(t, tz) == target_day))
        .cloned()
        .collect()
}

/// Count confirmed assignments per (team group, time slot). Declined and
/// pending assignments never enter this map.
pub fn confirmed_counts(
    assignments: &[Assignment],
    configured: &[String],
) -> HashMap<SlotKey, u32> {
    let mut counts: HashMap<SlotKey, u32> = HashMap::new();
    for a in assignments {
        if a.status == AssignmentStatus::Confirmed {
            let key = SlotKey::new(configured, &a.team, a.service_time);
            *counts.entry(key).or_default() += 1;
        }
    }
    counts
}

/// Sum declared need per (team group, time slot) across needed-slot records.
pub fn needed_counts(needed: &[NeededSlot], configured: &[String]) -> HashMap<SlotKey, u32> {
    let mut counts: HashMap<SlotKey, u32> = HashMap::new();
    for n in needed {
        let key = SlotKey::new(configured, &n.team, n.service_time);
        *counts.entry(key).or_default() += n.quantity;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn teams() -> Vec<String> {
        vec!["Security".into(), "Medical".into()]
    }

    fn assignment(team: &str, status: AssignmentStatus, time: Option<DateTime<Utc>>) -> Assignment {
        Assignment {
            person: "Pat".into(),
            team: team.into(),
            role: "Member".into(),
            status,
            service_time: time,
        }
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_team_group_substring_match() {
        let t = teams();
        assert_eq!(TeamGroup::resolve(&t, "Security Response"), TeamGroup::Configured(0));
        assert_eq!(TeamGroup::resolve(&t, "MEDICAL RESPONSE"), TeamGroup::Configured(1));
        assert_eq!(TeamGroup::resolve(&t, "security"), TeamGroup::Configured(0));
        assert_eq!(
            TeamGroup::resolve(&t, "Parking"),
            TeamGroup::Other("Parking".into())
        );
    }

    #[test]
    fn test_confirmed_counts_ignore_declined_and_pending() {
        let t = teams();
        let assignments = vec![
            assignment("Security", AssignmentStatus::Confirmed, Some(nine_am())),
            assignment("Security", AssignmentStatus::Declined, Some(nine_am())),
            assignment("Security", AssignmentStatus::Pending, Some(nine_am())),
            assignment("Security Response", AssignmentStatus::Confirmed, Some(nine_am())),
        ];
        let counts = confirmed_counts(&assignments, &t);
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        assert_eq!(counts.get(&key), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_needed_counts_sum_shared_slots() {
        let t = teams();
        let needed = vec![
            NeededSlot {
                team: "Security".into(),
                role: "Officer".into(),
                quantity: 2,
                service_time: Some(nine_am()),
            },
            NeededSlot {
                team: "Security Response".into(),
                role: "Greeter".into(),
                quantity: 1,
                service_time: Some(nine_am()),
            },
        ];
        let counts = needed_counts(&needed, &t);
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        assert_eq!(counts.get(&key), Some(&3));
    }

    #[test]
    fn test_day_filter_excludes_timeless() {
        let t = vec![
            assignment("Security", AssignmentStatus::Confirmed, Some(nine_am())),
            assignment("Security", AssignmentStatus::Confirmed, None),
        ];
        let kept = assignments_for_day(&t, "2026-03-01", New_York);
        assert_eq!(kept.len(), 1);
        let kept = assignments_for_day(&t, "2026-03-02", New_York);
        assert!(kept.is_empty());
    }
}
