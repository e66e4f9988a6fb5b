//! Record types — the data model flowing from the provider to the formatter.
//!
//! Raw records carry the provider's unparsed time string; normalized records
//! carry a resolved canonical time. Keeping the two stages as distinct types
//! means time parsing happens exactly once, in discovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plan (event) reference as listed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Provider-assigned plan id.
    pub id: String,
    /// Human-readable date label from the provider (e.g. "March 1, 2026").
    pub dates_label: Option<String>,
}

/// Assignment status as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Confirmed,
    Declined,
    Pending,
    Unknown,
}

impl AssignmentStatus {
    /// Parse the provider's status string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "confirmed" | "c" => AssignmentStatus::Confirmed,
            "declined" | "d" => AssignmentStatus::Declined,
            "unconfirmed" | "pending" | "u" => AssignmentStatus::Pending,
            _ => AssignmentStatus::Unknown,
        }
    }

    /// Status glyph for message rendering.
    pub fn glyph(&self) -> &'static str {
        match self {
            AssignmentStatus::Confirmed => "✅",
            AssignmentStatus::Declined => "❌",
            AssignmentStatus::Pending | AssignmentStatus::Unknown => "⏳",
        }
    }
}

/// A role assignment straight off the wire, time still unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAssignment {
    pub person: String,
    pub team: String,
    pub role: String,
    pub status: AssignmentStatus,
    /// Provider's time reference, if any. May be unparseable.
    pub raw_time: Option<String>,
}

/// A provider-declared staffing requirement, time still unparsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNeededSlot {
    pub team: String,
    pub role: String,
    /// How many people the provider says are still needed. Always >= 1.
    pub quantity: u32,
    pub raw_time: Option<String>,
}

/// A normalized assignment with its canonical service time resolved.
/// `service_time` of `None` means "TBD" — the record is excluded from any
/// date-scoped grouping, never guessed onto a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub person: String,
    pub team: String,
    pub role: String,
    pub status: AssignmentStatus,
    pub service_time: Option<DateTime<Utc>>,
}

/// A normalized staffing requirement with its canonical time resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeededSlot {
    pub team: String,
    pub role: String,
    pub quantity: u32,
    pub service_time: Option<DateTime<Utc>>,
}

/// A discovered upcoming event. Rebuilt from provider state on every tick,
/// never persisted.
#[derive(Debug, Clone)]
pub struct Event {
    pub plan: PlanRecord,
    /// Minimum canonical time across assignments and needed slots.
    /// `None` means no resolvable time — the event is never scheduled.
    pub earliest_time: Option<DateTime<Utc>>,
    pub assignments: Vec<Assignment>,
    pub needed_slots: Vec<NeededSlot>,
}
