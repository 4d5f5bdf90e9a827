//! Resource-tracker boundary.
//!
//! The attribution engine does not track resource gain/decay/caps itself;
//! it consumes an already-recorded view of when spends happened and how
//! much each ability spent in total. `ResourceLedger` is that contract,
//! `RecordedLedger` the implementation backed by a recording's spend lines.

use chrono::NaiveDateTime;
use hashbrown::HashMap;

use crate::combat_log::{AbilityId, ActorId, EventKind, Recording};

/// A single recorded resource spend.
#[derive(Debug, Clone)]
pub struct SpendRecord {
    pub timestamp: NaiveDateTime,
    pub source_id: ActorId,
    pub ability_id: AbilityId,
    pub amount: f64,
}

/// Cast and spend totals for one ability.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpenderStats {
    pub casts: u32,
    pub total_spent: f64,
}

/// Read-only view of the resource tracker, queried synchronously during a
/// replay pass.
pub trait ResourceLedger {
    /// Totals for one ability, or `None` if it never cast nor spent.
    fn spender(&self, ability_id: AbilityId) -> Option<SpenderStats>;

    /// Amount consumed by the most recent spend at or before `timestamp`.
    fn last_spend_at(&self, timestamp: NaiveDateTime) -> Option<f64>;
}

/// Ledger built from a recording's spend records and cast events, for one
/// tracked actor.
#[derive(Debug, Clone, Default)]
pub struct RecordedLedger {
    stats: HashMap<AbilityId, SpenderStats>,
    /// Sorted by timestamp.
    spends: Vec<SpendRecord>,
}

impl RecordedLedger {
    pub fn from_recording(recording: &Recording, actor_id: ActorId) -> Self {
        let mut stats: HashMap<AbilityId, SpenderStats> = HashMap::new();

        for event in &recording.events {
            if event.kind == EventKind::Cast && event.source_id == actor_id {
                stats.entry(event.ability_id).or_default().casts += 1;
            }
        }

        let mut spends: Vec<SpendRecord> = recording
            .spends
            .iter()
            .filter(|spend| spend.source_id == actor_id)
            .cloned()
            .collect();
        spends.sort_by_key(|spend| spend.timestamp);

        for spend in &spends {
            stats.entry(spend.ability_id).or_default().total_spent += spend.amount;
        }

        Self { stats, spends }
    }
}

impl ResourceLedger for RecordedLedger {
    fn spender(&self, ability_id: AbilityId) -> Option<SpenderStats> {
        self.stats.get(&ability_id).copied()
    }

    fn last_spend_at(&self, timestamp: NaiveDateTime) -> Option<f64> {
        let idx = self
            .spends
            .partition_point(|spend| spend.timestamp <= timestamp);
        idx.checked_sub(1).map(|i| self.spends[i].amount)
    }
}
