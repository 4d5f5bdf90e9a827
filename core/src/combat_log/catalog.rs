use hashbrown::HashMap;

use super::AbilityId;

/// Ability id → label mapping collected while parsing a recording.
///
/// The first label seen for an id wins. Abilities without a label are
/// still aggregated; reporting omits their rows.
#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    labels: HashMap<AbilityId, String>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, ability_id: AbilityId, label: &str) {
        self.labels
            .entry(ability_id)
            .or_insert_with(|| label.to_string());
    }

    pub fn label(&self, ability_id: AbilityId) -> Option<&str> {
        self.labels.get(&ability_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AbilityId, &str)> {
        self.labels.iter().map(|(id, label)| (*id, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
