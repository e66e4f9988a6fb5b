//! # Rostercall Core
//! Shared foundation: configuration, errors, record types, seam traits,
//! and timezone-aware time handling.

pub mod config;
pub mod error;
pub mod time;
pub mod traits;
pub mod types;

pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use traits::{ChatSink, PlanSource};
pub use types::{
    Assignment, AssignmentStatus, Event, NeededSlot, PlanRecord, RawAssignment, RawNeededSlot,
};
