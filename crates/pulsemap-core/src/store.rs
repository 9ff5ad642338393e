//! Ordered in-memory store of active events.
//!
//! Events append at the tail so insertion order is temporal order, and
//! leave through exactly two doors: a count cap that evicts the oldest
//! on add (a memory bound, blind to age), and age-based pruning once an
//! event's whole lifecycle has elapsed. Stored events are never mutated.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use pulsemap_types::AttackEvent;
use tracing::trace;

/// Append-only ordered collection of active events with a count cap.
#[derive(Debug, Clone)]
pub struct EventStore {
    events: VecDeque<AttackEvent>,
    max_events: usize,
}

impl EventStore {
    /// Create a store holding at most `max_events` events.
    ///
    /// A cap of zero is treated as one: the store always retains the
    /// newest event.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::new(),
            max_events: max_events.max(1),
        }
    }

    /// Append an event. If the cap is exceeded the oldest events are
    /// evicted regardless of their age; returns how many were evicted.
    pub fn add(&mut self, event: AttackEvent) -> usize {
        self.events.push_back(event);
        let mut evicted = 0;
        while self.events.len() > self.max_events {
            if self.events.pop_front().is_none() {
                break;
            }
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, cap = self.max_events, "event cap evicted oldest");
        }
        evicted
    }

    /// Remove every event whose age has reached `total_lifecycle_ms`.
    ///
    /// Survivors keep their relative order; calling again with the same
    /// `now` removes nothing further. Returns how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>, total_lifecycle_ms: u64) -> usize {
        let before = self.events.len();
        self.events
            .retain(|event| event.age_ms(now) < total_lifecycle_ms);
        before.saturating_sub(self.events.len())
    }

    /// Number of active events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate the active events in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AttackEvent> {
        self.events.iter()
    }

    /// The configured count cap.
    pub const fn cap(&self) -> usize {
        self.max_events
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use pulsemap_types::GeoPoint;

    use super::*;

    fn event_at(t0: DateTime<Utc>) -> AttackEvent {
        AttackEvent::new(GeoPoint::new(2.2, 48.8), GeoPoint::new(139.7, 35.7), t0)
    }

    #[test]
    fn add_preserves_insertion_order() {
        let t0 = Utc::now();
        let mut store = EventStore::new(10);
        let first = event_at(t0);
        let second = event_at(t0 + TimeDelta::milliseconds(5));
        store.add(first);
        store.add(second);

        let ids: Vec<_> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn eleventh_event_evicts_oldest_regardless_of_age() {
        let t0 = Utc::now();
        let mut store = EventStore::new(10);

        let mut all = Vec::new();
        for i in 0..11 {
            let event = event_at(t0 + TimeDelta::milliseconds(i));
            all.push(event);
            store.add(event);
        }

        assert_eq!(store.len(), 10);
        // The very first event is gone; everything else survives in order.
        let ids: Vec<_> = store.iter().map(|e| e.id).collect();
        let expected: Vec<_> = all[1..].iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn add_reports_eviction_count() {
        let mut store = EventStore::new(1);
        let t0 = Utc::now();
        assert_eq!(store.add(event_at(t0)), 0);
        assert_eq!(store.add(event_at(t0)), 1);
    }

    #[test]
    fn prune_removes_only_expired_events() {
        let t0 = Utc::now();
        let total = 5300;
        let mut store = EventStore::new(100);

        let expired = event_at(t0);
        let boundary = event_at(t0 + TimeDelta::milliseconds(1));
        let young = event_at(t0 + TimeDelta::milliseconds(4000));
        store.add(expired);
        store.add(boundary);
        store.add(young);

        // At exactly t0 + total: the first event's age equals the total
        // lifecycle (removed), the second is 1 ms younger (kept).
        let now = t0 + TimeDelta::milliseconds(total);
        let removed = store.prune(now, total as u64);

        assert_eq!(removed, 1);
        let ids: Vec<_> = store.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![boundary.id, young.id]);
    }

    #[test]
    fn prune_is_idempotent() {
        let t0 = Utc::now();
        let mut store = EventStore::new(100);
        store.add(event_at(t0));
        store.add(event_at(t0 + TimeDelta::milliseconds(10_000)));

        let now = t0 + TimeDelta::milliseconds(6000);
        assert_eq!(store.prune(now, 5300), 1);
        assert_eq!(store.prune(now, 5300), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn zero_cap_is_clamped_to_one() {
        let mut store = EventStore::new(0);
        store.add(event_at(Utc::now()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.cap(), 1);
    }
}
