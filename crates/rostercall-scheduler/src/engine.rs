//! The tick engine — one pass over provider truth per tick, at most one
//! announcement per tick.
//!
//! A tick rebuilds the upcoming-event list, buckets events by target-zone
//! calendar day, and walks the days in ascending order of earliest time.
//! The first day that is inside its posting window and not yet announced
//! gets the consolidated roster for every event on that day; the rest wait
//! for the next tick. A day is only marked posted after the sink accepts
//! the message, so a delivery failure is retried on the following tick.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Duration as TokioDuration;

use rostercall_core::config::RosterConfig;
use rostercall_core::error::Result;
use rostercall_core::time::{day_key, display_date};
use rostercall_core::traits::{ChatSink, PlanSource};
use rostercall_core::types::Event;
use rostercall_roster::aggregate::{assignments_for_day, confirmed_counts, needed_for_day, RosterEntry};
use rostercall_roster::format::format_schedule;
use rostercall_roster::open_slots::synthesize_open_entries;

use crate::cron::next_run_from_cron;
use crate::dedup::DedupTracker;
use crate::discovery::discover;
use crate::window::{decide, PostDecision};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was due.
    Idle,
    /// One announcement went out for this day key.
    Posted { day: String },
}

/// The periodic roster-announcement engine.
pub struct Engine {
    source: Arc<dyn PlanSource>,
    sink: Arc<dyn ChatSink>,
    config: RosterConfig,
    dedup: DedupTracker,
}

impl Engine {
    pub fn new(source: Arc<dyn PlanSource>, sink: Arc<dyn ChatSink>, config: RosterConfig) -> Self {
        Self {
            source,
            sink,
            config,
            dedup: DedupTracker::new(),
        }
    }

    /// Run one tick against the current wall clock.
    pub async fn run_once(&mut self) -> Result<TickOutcome> {
        self.run_at(Utc::now()).await
    }

    /// Run one tick at an explicit instant.
    pub async fn run_at(&mut self, now: DateTime<Utc>) -> Result<TickOutcome> {
        let tz = self.config.schedule.timezone;
        let lead = self.config.schedule.post_lead_hours;

        let events = discover(self.source.as_ref(), &self.config, now).await?;

        // Bucket by target-zone day, keeping the minimum earliest time per
        // day. Events already started and timeless events never schedule.
        let mut days: BTreeMap<String, DateTime<Utc>> = BTreeMap::new();
        for event in &events {
            if let Some(earliest) = event.earliest_time {
                if earliest > now {
                    let key = day_key(earliest, tz);
                    days.entry(key)
                        .and_modify(|t| *t = (*t).min(earliest))
                        .or_insert(earliest);
                }
            }
        }

        for (day, earliest) in days {
            if self.dedup.has_posted(&day) {
                continue;
            }
            match decide(now, earliest, lead) {
                PostDecision::NotYet => {}
                PostDecision::Missed => {
                    tracing::warn!("⏭️ Posting window for {day} already passed, retiring");
                    self.dedup.mark_posted(&day);
                }
                PostDecision::Eligible => {
                    let text = self.render_day(&events, &day, earliest);
                    self.sink.post(&text, None).await?;
                    self.dedup.mark_posted(&day);
                    tracing::info!("✅ Announced roster for {day}");
                    return Ok(TickOutcome::Posted { day });
                }
            }
        }

        Ok(TickOutcome::Idle)
    }

    /// Consolidate every event on `day` into one rendered message.
    fn render_day(&self, events: &[Event], day: &str, earliest: DateTime<Utc>) -> String {
        let tz = self.config.schedule.timezone;
        let teams = &self.config.teams;

        let mut assignments = Vec::new();
        let mut needed = Vec::new();
        for event in events {
            assignments.extend(assignments_for_day(&event.assignments, day, tz));
            needed.extend(needed_for_day(&event.needed_slots, day, tz));
        }

        let confirmed = confirmed_counts(&assignments, &teams.names);
        let mut entries: Vec<RosterEntry> =
            assignments.into_iter().map(RosterEntry::Assigned).collect();
        entries.extend(synthesize_open_entries(&needed, &confirmed, &teams.names));

        format_schedule(&entries, Some(day), &display_date(earliest, tz), teams, tz)
    }

    /// Periodic mode: tick on the configured cron cadence until the process
    /// is stopped. A failed tick is logged and the loop keeps going — the
    /// next scheduled tick always runs. Only an unusable cron expression
    /// ends the loop.
    pub async fn run_forever(&mut self) -> Result<()> {
        tracing::info!("🚀 Scheduler running on cadence '{}'", self.config.schedule.cron);
        loop {
            let now = Utc::now();
            let next = match next_run_from_cron(&self.config.schedule.cron, now) {
                Some(next) => next,
                None => {
                    return Err(rostercall_core::error::RosterError::Config(format!(
                        "invalid cron expression '{}'",
                        self.config.schedule.cron
                    )));
                }
            };

            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!("💤 Next tick at {next}");
            tokio::time::sleep(TokioDuration::from_secs(wait.as_secs().max(1))).await;

            match self.run_once().await {
                Ok(TickOutcome::Posted { day }) => {
                    tracing::info!("📣 Tick posted roster for {day}");
                }
                Ok(TickOutcome::Idle) => {
                    tracing::debug!("😴 Tick idle, nothing due");
                }
                Err(e) if e.is_fatal() => {
                    tracing::error!("❌ Tick aborted: {e}");
                }
                Err(e) => {
                    tracing::error!("❌ Tick failed: {e}");
                }
            }
        }
    }

    #[cfg(test)]
    fn dedup(&self) -> &DedupTracker {
        &self.dedup
    }
}
