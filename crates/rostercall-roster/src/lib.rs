//! # Rostercall Roster
//! Turns normalized assignments and needed-position records into a
//! reconciled, deterministically rendered schedule message.

pub mod aggregate;
pub mod format;
pub mod open_slots;

pub use aggregate::{RosterEntry, SlotKey, TeamGroup};
pub use format::format_schedule;
pub use open_slots::{open_counts, synthesize_open_entries};
