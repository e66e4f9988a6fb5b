//! Open-slot reconciliation — `max(needed − confirmed, 0)` per slot.
//!
//! Only confirmed assignments reduce the open count. Declines are never
//! treated as a signal of openness: a declined position may already be
//! covered by a replacement, and counting it would double-book the slot.

use std::collections::HashMap;

use rostercall_core::types::NeededSlot;

use crate::aggregate::{RosterEntry, SlotKey};

/// Derive open counts per slot, floored at zero. Slots fully covered by
/// confirmed assignments are absent from the result.
pub fn open_counts(
    needed: &HashMap<SlotKey, u32>,
    confirmed: &HashMap<SlotKey, u32>,
) -> HashMap<SlotKey, u32> {
    needed
        .iter()
        .filter_map(|(key, &need)| {
            let have = confirmed.get(key).copied().unwrap_or(0);
            let open = need.saturating_sub(have);
            (open > 0).then(|| (key.clone(), open))
        })
        .collect()
}

/// Synthesize one open placeholder per uncovered unit of need, preserving
/// the originating record's team and role labels.
///
/// Confirmed coverage is consumed greedily in record order, so when several
/// needed-slot records share a slot the total placeholder count still equals
/// `max(sum(needed) − confirmed, 0)` for that slot.
pub fn synthesize_open_entries(
    needed: &[NeededSlot],
    confirmed: &HashMap<SlotKey, u32>,
    configured: &[String],
) -> Vec<RosterEntry> {
    let mut remaining: HashMap<SlotKey, u32> = confirmed.clone();
    let mut entries = Vec::new();

    for n in needed {
        let key = SlotKey::new(configured, &n.team, n.service_time);
        let have = remaining.entry(key).or_default();
        let covered = (*have).min(n.quantity);
        *have -= covered;
        for _ in 0..(n.quantity - covered) {
            entries.push(RosterEntry::Open {
                team: n.team.clone(),
                role: n.role.clone(),
                time: n.service_time,
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn teams() -> Vec<String> {
        vec!["Security".into(), "Medical".into()]
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap()
    }

    fn needed(team: &str, quantity: u32) -> NeededSlot {
        NeededSlot {
            team: team.into(),
            role: "Officer".into(),
            quantity,
            service_time: Some(nine_am()),
        }
    }

    #[test]
    fn test_open_never_negative() {
        let t = teams();
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        let needed_map = HashMap::from([(key.clone(), 1u32)]);
        let confirmed = HashMap::from([(key.clone(), 5u32)]);
        let open = open_counts(&needed_map, &confirmed);
        assert!(open.is_empty());
    }

    #[test]
    fn test_open_is_needed_minus_confirmed() {
        let t = teams();
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        let needed_map = HashMap::from([(key.clone(), 3u32)]);
        let confirmed = HashMap::from([(key.clone(), 1u32)]);
        let open = open_counts(&needed_map, &confirmed);
        assert_eq!(open.get(&key), Some(&2));
    }

    #[test]
    fn test_fully_covered_slot_emits_nothing() {
        let t = teams();
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        let confirmed = HashMap::from([(key, 2u32)]);
        let entries = synthesize_open_entries(&[needed("Security", 2)], &confirmed, &t);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_placeholders_one_per_open_unit() {
        let t = teams();
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        let confirmed = HashMap::from([(key, 1u32)]);
        let entries = synthesize_open_entries(&[needed("Security", 3)], &confirmed, &t);
        assert_eq!(entries.len(), 2);
        for e in &entries {
            match e {
                RosterEntry::Open { team, role, time } => {
                    assert_eq!(team, "Security");
                    assert_eq!(role, "Officer");
                    assert_eq!(*time, Some(nine_am()));
                }
                RosterEntry::Assigned(_) => panic!("expected open placeholder"),
            }
        }
    }

    #[test]
    fn test_coverage_consumed_across_shared_slot_records() {
        let t = teams();
        let key = SlotKey::new(&t, "Security", Some(nine_am()));
        let confirmed = HashMap::from([(key, 2u32)]);
        // Two records share the slot: need 2 + 1 = 3, have 2 -> 1 open
        let records = vec![needed("Security", 2), needed("Security Response", 1)];
        let entries = synthesize_open_entries(&records, &confirmed, &t);
        assert_eq!(entries.len(), 1);
    }
}
