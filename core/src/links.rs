//! Causal link graph between recorded events.
//!
//! Links are established by the exporter before a replay pass runs; the
//! engine only queries them. Targets of a `(event, kind)` pair keep their
//! registration order, which is not necessarily chronological order: an
//! exporter may register a link to an event that occurs earlier in the
//! stream. Callers must not assume the first returned event is the
//! earliest one.

use hashbrown::HashMap;

use crate::combat_log::{CombatEvent, EventId};

/// Canonical link kinds understood by the attribution engine.
pub mod link_kind {
    /// Marks a cast that consumed resource stacks.
    pub const SPENDER: &str = "spender";
    /// Ties a triggered-cast chain together. The initiating cast links to
    /// the chain head; the chain head links to every cast of the chain.
    pub const CHAIN: &str = "chain";
    /// Ties a chain's casts to the damage they produced.
    pub const CHAIN_DAMAGE: &str = "chain-damage";
}

/// Directed, named relations between events, queried read-only during a
/// replay pass. The same query always returns the same result for the
/// lifetime of the pass.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    links: HashMap<EventId, HashMap<String, Vec<EventId>>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link. Targets accumulate in registration order.
    pub fn insert(&mut self, from: EventId, kind: &str, to: EventId) {
        self.links
            .entry(from)
            .or_default()
            .entry(kind.to_string())
            .or_default()
            .push(to);
    }

    fn targets(&self, from: EventId, kind: &str) -> &[EventId] {
        self.links
            .get(&from)
            .and_then(|kinds| kinds.get(kind))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether at least one link of `kind` originates at `from`.
    pub fn has_related(&self, from: EventId, kind: &str) -> bool {
        !self.targets(from, kind).is_empty()
    }

    /// First linked event satisfying `predicate`, in registration order.
    pub fn related_event<'a>(
        &self,
        events: &'a [CombatEvent],
        from: EventId,
        kind: &str,
        predicate: impl Fn(&CombatEvent) -> bool,
    ) -> Option<&'a CombatEvent> {
        self.targets(from, kind)
            .iter()
            .filter_map(|&id| events.get(id))
            .find(|event| predicate(event))
    }

    /// All linked events satisfying `predicate`, in registration order.
    pub fn related_events<'a>(
        &self,
        events: &'a [CombatEvent],
        from: EventId,
        kind: &str,
        predicate: impl Fn(&CombatEvent) -> bool,
    ) -> Vec<&'a CombatEvent> {
        self.targets(from, kind)
            .iter()
            .filter_map(|&id| events.get(id))
            .filter(|event| predicate(event))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::combat_log::{CombatEvent, EventKind};

    fn event(event_id: EventId, kind: EventKind, millis: i64) -> CombatEvent {
        let base = NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        CombatEvent {
            event_id,
            kind,
            timestamp: base + chrono::Duration::milliseconds(millis),
            source_id: 1,
            ability_id: 100,
            amount: kind.ne(&EventKind::Cast).then_some(50),
        }
    }

    #[test]
    fn test_registration_order_beats_timestamp_order() {
        let events = vec![
            event(0, EventKind::Cast, 0),
            event(1, EventKind::Damage, 500),
            event(2, EventKind::Damage, 100),
        ];
        let mut graph = LinkGraph::new();
        // Later event registered first
        graph.insert(0, link_kind::CHAIN_DAMAGE, 1);
        graph.insert(0, link_kind::CHAIN_DAMAGE, 2);

        let first = graph
            .related_event(&events, 0, link_kind::CHAIN_DAMAGE, |e| e.is_outcome())
            .expect("linked event");
        assert_eq!(first.event_id, 1, "first by registration, not timestamp");

        let all = graph.related_events(&events, 0, link_kind::CHAIN_DAMAGE, |e| e.is_outcome());
        assert_eq!(
            all.iter().map(|e| e.event_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_predicate_filters_targets() {
        let events = vec![
            event(0, EventKind::Cast, 0),
            event(1, EventKind::Cast, 100),
            event(2, EventKind::Damage, 200),
        ];
        let mut graph = LinkGraph::new();
        graph.insert(0, link_kind::CHAIN, 1);
        graph.insert(0, link_kind::CHAIN, 2);

        let casts = graph.related_events(&events, 0, link_kind::CHAIN, |e| e.is_cast());
        assert_eq!(casts.len(), 1);
        assert_eq!(casts[0].event_id, 1);
    }

    #[test]
    fn test_missing_link_is_not_an_error() {
        let events = vec![event(0, EventKind::Cast, 0)];
        let graph = LinkGraph::new();

        assert!(!graph.has_related(0, link_kind::SPENDER));
        assert!(
            graph
                .related_event(&events, 0, link_kind::SPENDER, |_| true)
                .is_none()
        );
        assert!(
            graph
                .related_events(&events, 0, link_kind::SPENDER, |_| true)
                .is_empty()
        );
    }

    #[test]
    fn test_dangling_target_is_skipped() {
        let events = vec![event(0, EventKind::Cast, 0)];
        let mut graph = LinkGraph::new();
        graph.insert(0, link_kind::SPENDER, 7);

        // has_related reflects registration; resolution drops the dangling id
        assert!(graph.has_related(0, link_kind::SPENDER));
        assert!(
            graph
                .related_events(&events, 0, link_kind::SPENDER, |_| true)
                .is_empty()
        );
    }
}
