//! # Rostercall Scheduler
//! The periodic tick engine: discovers upcoming events, decides whether a
//! roster announcement is due, and posts it exactly once per event date.

pub mod cron;
pub mod dedup;
pub mod discovery;
pub mod engine;
pub mod window;

pub use dedup::DedupTracker;
pub use engine::{Engine, TickOutcome};
pub use window::PostDecision;
