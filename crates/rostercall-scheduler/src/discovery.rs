//! Event discovery — scan the provider's lookahead window and normalize
//! every plan into an `Event` with a resolved earliest service time.
//!
//! Discovery is stateless: every tick rebuilds the event list from provider
//! truth, so a roster change between ticks is always reflected.

use chrono::{DateTime, Duration, Utc};

use rostercall_core::config::RosterConfig;
use rostercall_core::error::Result;
use rostercall_core::time::canonical_time;
use rostercall_core::traits::PlanSource;
use rostercall_core::types::{Assignment, Event, NeededSlot};

/// Fetch and normalize all events in `[now, now + lookahead_days]`.
///
/// Returned events are sorted ascending by earliest service time, events
/// with no resolvable time last; ties keep provider order.
pub async fn discover(
    source: &dyn PlanSource,
    config: &RosterConfig,
    now: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let tz = config.schedule.timezone;
    let service_type = &config.provider.service_type_id;
    let before = now + Duration::days(config.schedule.lookahead_days);

    let plans = source.plans_in_range(service_type, now, before).await?;
    tracing::debug!("🔍 {} plan(s) in the next {} day(s)", plans.len(), config.schedule.lookahead_days);

    let mut events = Vec::with_capacity(plans.len());
    for plan in plans {
        let raw_assignments = source.assignments(service_type, &plan.id).await?;
        let raw_needed = source.needed_slots(service_type, &plan.id).await?;

        let assignments: Vec<Assignment> = raw_assignments
            .into_iter()
            .map(|a| Assignment {
                service_time: a.raw_time.as_deref().and_then(|t| canonical_time(t, tz)),
                person: a.person,
                team: a.team,
                role: a.role,
                status: a.status,
            })
            .collect();

        let needed_slots: Vec<NeededSlot> = raw_needed
            .into_iter()
            .map(|n| NeededSlot {
                service_time: n.raw_time.as_deref().and_then(|t| canonical_time(t, tz)),
                team: n.team,
                role: n.role,
                quantity: n.quantity,
            })
            .collect();

        let earliest_time = assignments
            .iter()
            .filter_map(|a| a.service_time)
            .chain(needed_slots.iter().filter_map(|n| n.service_time))
            .min();

        events.push(Event {
            plan,
            earliest_time,
            assignments,
            needed_slots,
        });
    }

    events.sort_by_key(|e| (e.earliest_time.is_none(), e.earliest_time));
    Ok(events)
}
