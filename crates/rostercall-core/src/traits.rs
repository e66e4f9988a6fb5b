//! Seam traits between the engine and the outside world.
//!
//! The scheduler engine only ever talks to `dyn PlanSource` and
//! `dyn ChatSink`, so tests can drive a full tick with in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::{PlanRecord, RawAssignment, RawNeededSlot};

/// The scheduling-source query surface. All list operations are fully
/// drained (pagination followed to exhaustion) before returning.
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// List plans whose date range intersects `[after, before]` for a
    /// service category.
    async fn plans_in_range(
        &self,
        service_type_id: &str,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<Vec<PlanRecord>>;

    /// List role assignments for a plan. A missing sub-resource is an
    /// empty list, not an error.
    async fn assignments(&self, service_type_id: &str, plan_id: &str)
        -> Result<Vec<RawAssignment>>;

    /// List needed-position records for a plan. A missing sub-resource is
    /// an empty list, not an error.
    async fn needed_slots(&self, service_type_id: &str, plan_id: &str)
        -> Result<Vec<RawNeededSlot>>;
}

/// The chat-posting surface: deliver one rendered text block.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Post a message (optionally with an image URL) to the fixed
    /// destination. An unexpected-but-delivered status is non-fatal.
    async fn post(&self, text: &str, picture_url: Option<&str>) -> Result<()>;
}
