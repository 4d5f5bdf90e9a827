use hashbrown::HashMap;

use crate::combat_log::AbilityId;

/// Per-ability accumulators for one replay pass.
///
/// Owned by the pass that fills it; a new pass starts from a fresh
/// instance. Nothing upstream reads these totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpenderTotals {
    /// Outcome amounts attributed to spends on each ability.
    attributed: HashMap<AbilityId, i64>,
    /// Resource consumed by the casts that initiated chains credited to
    /// each ability.
    chained_spend: HashMap<AbilityId, f64>,
}

impl SpenderTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attributed(&mut self, ability_id: AbilityId, amount: i64) {
        *self.attributed.entry(ability_id).or_insert(0) += amount;
    }

    pub fn add_chained_spend(&mut self, ability_id: AbilityId, amount: f64) {
        *self.chained_spend.entry(ability_id).or_insert(0.0) += amount;
    }

    pub fn attributed(&self, ability_id: AbilityId) -> i64 {
        self.attributed.get(&ability_id).copied().unwrap_or_default()
    }

    pub fn chained_spend(&self, ability_id: AbilityId) -> f64 {
        self.chained_spend
            .get(&ability_id)
            .copied()
            .unwrap_or_default()
    }

    /// Abilities that received at least one attribution.
    pub fn abilities(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.attributed.keys().copied()
    }

    pub fn total_attributed(&self) -> i64 {
        self.attributed.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.attributed.is_empty()
    }
}
