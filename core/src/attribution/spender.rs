//! Spend-flag state machine and per-event routing.

use crate::combat_log::{ActorId, CombatEvent, EventKind, Recording};
use crate::links::link_kind;
use crate::profile::AttributionProfile;
use crate::resources::ResourceLedger;

use super::{SpenderTotals, resolve_chain};

/// Attributes resource spend to outcomes for a single tracked actor.
///
/// State is one pending-spend slot for the whole actor, not one per
/// ability: the stream is expected to deliver a flagged cast's outcome
/// before the next flagged cast arrives. When it does not, the stale flag
/// is dropped on the next qualifying cast and that spend is lost from
/// attribution. Keep it this way; a per-ability queue changes observable
/// results.
pub struct SpenderAttribution<'a> {
    profile: &'a AttributionProfile,
    actor_id: ActorId,
    pending_spend: bool,
    totals: SpenderTotals,
}

impl<'a> SpenderAttribution<'a> {
    pub fn new(profile: &'a AttributionProfile, actor_id: ActorId) -> Self {
        Self {
            profile,
            actor_id,
            pending_spend: false,
            totals: SpenderTotals::new(),
        }
    }

    /// Whether a flagged cast is still waiting for its outcome.
    pub fn pending_spend(&self) -> bool {
        self.pending_spend
    }

    pub fn totals(&self) -> &SpenderTotals {
        &self.totals
    }

    pub fn into_totals(self) -> SpenderTotals {
        self.totals
    }

    /// Handle one event of the replay stream, in order.
    pub fn process_event(
        &mut self,
        event: &CombatEvent,
        recording: &Recording,
        ledger: &dyn ResourceLedger,
    ) {
        if event.source_id != self.actor_id || !self.profile.is_eligible(event.ability_id) {
            return;
        }

        match event.kind {
            EventKind::Cast => self.on_cast(event, recording, ledger),
            EventKind::Damage | EventKind::Heal => self.on_outcome(event),
        }
    }

    fn on_cast(
        &mut self,
        event: &CombatEvent,
        recording: &Recording,
        ledger: &dyn ResourceLedger,
    ) {
        // re-evaluated on every qualifying cast; an unconsumed flag is
        // silently dropped here
        self.pending_spend = recording
            .links
            .has_related(event.event_id, link_kind::SPENDER);

        let Some(chain) = &self.profile.chain else {
            return;
        };
        if event.ability_id != chain.trigger_ability {
            return;
        }

        if let Some(resolved) = resolve_chain(event, recording, chain) {
            self.totals
                .add_attributed(resolved.ability_id, resolved.amount);
            if let Some(spent) = ledger.last_spend_at(event.timestamp) {
                self.totals.add_chained_spend(resolved.ability_id, spent);
            }
        }
    }

    fn on_outcome(&mut self, event: &CombatEvent) {
        if !self.pending_spend {
            return;
        }
        self.pending_spend = false;

        let ability_id = self.profile.substitute(event.ability_id);
        self.totals
            .add_attributed(ability_id, event.amount.unwrap_or_default());
    }
}
