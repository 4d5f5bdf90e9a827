use serde::{Deserialize, Serialize};

use crate::combat_log::AbilityId;

pub const PROFILE_DSL_VERSION: u32 = 1;

/// One analysis profile: the eligible-ability partition, optional chain
/// handling, and the identifier-substitution table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttributionProfile {
    #[serde(default = "default_version")]
    pub version: u32,

    pub name: String,

    /// Abilities whose casts and outcomes participate in spend attribution.
    pub eligible_abilities: Vec<AbilityId>,

    /// Triggered-cast chain handling. Absent disables the chain resolver.
    #[serde(default)]
    pub chain: Option<ChainProfile>,

    /// Outcome-identifier remappings applied once at attribution time.
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ChainProfile {
    /// The chain-sensitive ability: it appears both as a normal cast and as
    /// a proc triggered by another ability.
    pub trigger_ability: AbilityId,

    /// Identifier credited with the folded chain hits. Must not itself be
    /// in the eligible set, which keeps the two attribution paths disjoint.
    pub attribute_to: AbilityId,
}

/// Remap an outcome-effect identifier to the identifier it aggregates
/// under (a periodic effect folded into its parent ability, for example).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Substitution {
    pub from: AbilityId,
    pub to: AbilityId,
}

fn default_version() -> u32 {
    PROFILE_DSL_VERSION
}

impl AttributionProfile {
    pub fn is_eligible(&self, ability_id: AbilityId) -> bool {
        self.eligible_abilities.contains(&ability_id)
    }

    /// Resolve the identifier an outcome aggregates under. Identity unless
    /// a substitution is declared.
    pub fn substitute(&self, ability_id: AbilityId) -> AbilityId {
        self.substitutions
            .iter()
            .find(|sub| sub.from == ability_id)
            .map(|sub| sub.to)
            .unwrap_or(ability_id)
    }

    /// Structural checks beyond what serde enforces. Returns the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.eligible_abilities.is_empty() {
            return Err("eligible_abilities must not be empty".to_string());
        }

        for (i, sub) in self.substitutions.iter().enumerate() {
            if self.substitutions[..i].iter().any(|s| s.from == sub.from) {
                return Err(format!("duplicate substitution for ability {}", sub.from));
            }
            if sub.from == sub.to {
                return Err(format!("substitution for ability {} maps to itself", sub.from));
            }
        }

        if let Some(chain) = &self.chain {
            if !self.is_eligible(chain.trigger_ability) {
                return Err(format!(
                    "chain trigger ability {} is not in the eligible set",
                    chain.trigger_ability
                ));
            }
            if self.is_eligible(chain.attribute_to) {
                return Err(format!(
                    "chain attribute_to {} must not be in the eligible set",
                    chain.attribute_to
                ));
            }
        }

        Ok(())
    }
}
