//! Message formatting — renders the reconciled roster into the chat text.
//!
//! Rendering is a pure function of its inputs: identical inputs always
//! produce byte-identical text, so a dry run shows exactly what a live run
//! would post.

use std::collections::BTreeMap;

use chrono_tz::Tz;

use rostercall_core::config::TeamsConfig;
use rostercall_core::time::{day_key, display_time};

use crate::aggregate::{RosterEntry, TeamGroup};

const LEGEND: &str = "✅ = Confirmed | ⏳ = Pending | ❌ = Declined";

/// Render the schedule message for one date.
///
/// `target_day` filters entries to that day key; `None` renders everything
/// (single-event legacy mode). Entries with no resolvable time never appear
/// in date-scoped output.
pub fn format_schedule(
    entries: &[RosterEntry],
    target_day: Option<&str>,
    display_date: &str,
    teams: &TeamsConfig,
    tz: Tz,
) -> String {
    let mut sections: BTreeMap<TeamGroup, Vec<&RosterEntry>> = BTreeMap::new();
    // Configured teams always render, even when empty.
    for i in 0..teams.names.len() {
        sections.insert(TeamGroup::Configured(i), Vec::new());
    }

    for entry in entries {
        if let Some(day) = target_day {
            match entry.time() {
                Some(t) if day_key(t, tz) == day => {}
                _ => continue,
            }
        }
        let group = TeamGroup::resolve(&teams.names, entry.team());
        sections.entry(group).or_default().push(entry);
    }

    let mut lines = vec![format!("🗓️ Service Schedule for {display_date}"), String::new()];

    for (group, mut members) in sections {
        // Catch-all teams only render when they have entries.
        if matches!(group, TeamGroup::Other(_)) && members.is_empty() {
            continue;
        }

        let name = group.display_name(&teams.names);
        lines.push(format!("{} {} TEAM:", team_icon(name), name.to_uppercase()));

        if members.is_empty() {
            lines.push("- No assignments scheduled.".into());
            lines.push(String::new());
            continue;
        }

        // Ascending by service time, timeless entries last; stable, so
        // assignments stay ahead of placeholders at the same time.
        members.sort_by_key(|e| (e.time().is_none(), e.time()));

        let mut has_open = false;
        for entry in &members {
            let time_text = entry
                .time()
                .map(|t| display_time(t, tz))
                .unwrap_or_else(|| "TBD".into());
            match entry {
                RosterEntry::Assigned(a) => {
                    lines.push(format!(
                        "- {} - {} - {} {}",
                        a.person,
                        a.role,
                        time_text,
                        a.status.glyph()
                    ));
                }
                RosterEntry::Open { role, .. } => {
                    has_open = true;
                    lines.push(format!("- 🙋 OPEN - {role} - {time_text}"));
                }
            }
        }

        if has_open {
            if let Some(url) = teams.sign_up_url(name) {
                lines.push(format!("Sign up: {url}"));
            }
        }

        lines.push(String::new());
    }

    lines.push(LEGEND.into());
    lines.join("\n")
}

fn team_icon(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.contains("security") {
        "👮"
    } else if lower.contains("medical") {
        "🏥"
    } else {
        "👥"
    }
}
