//! Triggered-cast chain resolution.
//!
//! A cast of the chain-sensitive ability may be the start of a burst: the
//! exporter links the initiating cast to the chain-head cast, the head to
//! every cast of the chain (the same link kind in both directions), and
//! each chain cast to the damage it produced. Only the initiating cast
//! carries the reverse link to the head, so each chain resolves exactly
//! once.

use crate::combat_log::{AbilityId, CombatEvent, EventKind, Recording};
use crate::links::link_kind;
use crate::profile::ChainProfile;

/// Result of resolving one chain-initiating cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainAttribution {
    /// Proxy identifier the folded hits are credited to.
    pub ability_id: AbilityId,
    /// Sum of the chain's damage amounts, first hit excluded.
    pub amount: i64,
}

/// Walk the chain links from a cast of the chain-sensitive ability.
///
/// Returns `None` when the cast is not part of a chain, when the chain has
/// no extra triggered casts, or when the chain produced at most one hit.
/// The first collected hit is the one the cast would have landed without
/// the triggering ability; the flag machine already attributes it, so it
/// is excluded here.
pub fn resolve_chain(
    cast: &CombatEvent,
    recording: &Recording,
    chain: &ChainProfile,
) -> Option<ChainAttribution> {
    let events = &recording.events;
    let links = &recording.links;

    let head = links.related_event(events, cast.event_id, link_kind::CHAIN, |e| {
        e.kind == EventKind::Cast
    })?;

    let triggered = links.related_events(events, head.event_id, link_kind::CHAIN, |e| {
        e.kind == EventKind::Cast
    });
    if triggered.len() <= 1 {
        return None;
    }

    let mut hits: Vec<&CombatEvent> = Vec::new();
    for triggered_cast in &triggered {
        hits.extend(links.related_events(
            events,
            triggered_cast.event_id,
            link_kind::CHAIN_DAMAGE,
            |e| e.kind == EventKind::Damage,
        ));
    }

    // a single hit cannot be told apart from a non-chained cast
    if hits.len() <= 1 {
        return None;
    }

    let amount = hits[1..].iter().filter_map(|hit| hit.amount).sum();
    Some(ChainAttribution {
        ability_id: chain.attribute_to,
        amount,
    })
}
