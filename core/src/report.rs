//! Spender-efficiency reporting.
//!
//! Joins a pass's totals with the resource ledger and the ability catalog
//! into read-only rows for tabular display. Nothing here mutates the
//! aggregate.

use std::fmt;

use crate::attribution::SpenderTotals;
use crate::combat_log::{AbilityCatalog, AbilityId};
use crate::profile::AttributionProfile;
use crate::resources::ResourceLedger;

/// A derived ratio. Zero denominators surface as `Undefined`, never as
/// NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    Undefined,
}

impl Metric {
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Metric::Undefined
        } else {
            Metric::Value(numerator / denominator)
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Undefined => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v:.1}"),
            Metric::Undefined => write!(f, "--"),
        }
    }
}

/// One row of the spender-efficiency table.
#[derive(Debug, Clone)]
pub struct SpenderRow {
    pub ability_id: AbilityId,
    pub label: String,
    pub casts: u32,
    pub total_spent: f64,
    pub attributed: i64,
    pub amount_per_point: Metric,
    pub points_per_cast: Metric,
    pub amount_per_cast: Metric,
}

/// Build display rows for every ability with at least one attribution.
///
/// Abilities without a catalog label are omitted from the output; their
/// totals stay in the aggregate. The chain proxy row substitutes the
/// chained resource amount for its ledger spend.
pub fn spender_breakdown(
    totals: &SpenderTotals,
    ledger: &dyn ResourceLedger,
    catalog: &AbilityCatalog,
    profile: &AttributionProfile,
) -> Vec<SpenderRow> {
    let mut rows = Vec::new();

    for ability_id in totals.abilities() {
        let Some(label) = catalog.label(ability_id) else {
            continue;
        };

        let mut stats = ledger.spender(ability_id).unwrap_or_default();
        if let Some(chain) = &profile.chain
            && chain.attribute_to == ability_id
        {
            stats.total_spent = totals.chained_spend(ability_id);
        }

        let attributed = totals.attributed(ability_id);
        rows.push(SpenderRow {
            ability_id,
            label: label.to_string(),
            casts: stats.casts,
            total_spent: stats.total_spent,
            attributed,
            amount_per_point: Metric::ratio(attributed as f64, stats.total_spent),
            points_per_cast: Metric::ratio(stats.total_spent, stats.casts as f64),
            amount_per_cast: Metric::ratio(attributed as f64, stats.casts as f64),
        });
    }

    rows.sort_by(|a, b| b.attributed.cmp(&a.attributed));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{AttributionProfile, ChainProfile, PROFILE_DSL_VERSION};
    use crate::resources::SpenderStats;

    struct FixedLedger(Vec<(AbilityId, SpenderStats)>);

    impl ResourceLedger for FixedLedger {
        fn spender(&self, ability_id: AbilityId) -> Option<SpenderStats> {
            self.0
                .iter()
                .find(|(id, _)| *id == ability_id)
                .map(|(_, stats)| *stats)
        }

        fn last_spend_at(&self, _timestamp: chrono::NaiveDateTime) -> Option<f64> {
            None
        }
    }

    fn profile() -> AttributionProfile {
        AttributionProfile {
            version: PROFILE_DSL_VERSION,
            name: "test".to_string(),
            eligible_abilities: vec![100],
            chain: Some(ChainProfile {
                trigger_ability: 100,
                attribute_to: 900,
            }),
            substitutions: Vec::new(),
        }
    }

    #[test]
    fn test_zero_spend_reports_undefined_not_infinity() {
        let mut totals = SpenderTotals::new();
        totals.add_attributed(100, 500);

        let ledger = FixedLedger(vec![(
            100,
            SpenderStats {
                casts: 4,
                total_spent: 0.0,
            },
        )]);
        let mut catalog = AbilityCatalog::new();
        catalog.record(100, "Stormstrike");

        let rows = spender_breakdown(&totals, &ledger, &catalog, &profile());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount_per_point, Metric::Undefined);
        assert_eq!(rows[0].points_per_cast, Metric::Value(0.0));
        assert_eq!(rows[0].amount_per_cast, Metric::Value(125.0));
    }

    #[test]
    fn test_zero_casts_reports_undefined_per_cast_metrics() {
        let mut totals = SpenderTotals::new();
        totals.add_attributed(100, 500);

        let ledger = FixedLedger(Vec::new());
        let mut catalog = AbilityCatalog::new();
        catalog.record(100, "Stormstrike");

        let rows = spender_breakdown(&totals, &ledger, &catalog, &profile());
        assert_eq!(rows[0].points_per_cast, Metric::Undefined);
        assert_eq!(rows[0].amount_per_cast, Metric::Undefined);
    }

    #[test]
    fn test_row_omitted_without_label_but_aggregate_kept() {
        let mut totals = SpenderTotals::new();
        totals.add_attributed(100, 500);
        totals.add_attributed(200, 300);

        let ledger = FixedLedger(Vec::new());
        let mut catalog = AbilityCatalog::new();
        catalog.record(100, "Stormstrike");

        let rows = spender_breakdown(&totals, &ledger, &catalog, &profile());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ability_id, 100);
        // the aggregate itself does not disappear on a metadata miss
        assert_eq!(totals.attributed(200), 300);
    }

    #[test]
    fn test_chain_proxy_substitutes_chained_spend() {
        let mut totals = SpenderTotals::new();
        totals.add_attributed(900, 270);
        totals.add_chained_spend(900, 10.0);

        let ledger = FixedLedger(vec![(
            900,
            SpenderStats {
                casts: 2,
                total_spent: 0.0,
            },
        )]);
        let mut catalog = AbilityCatalog::new();
        catalog.record(900, "Tempest Surge");

        let rows = spender_breakdown(&totals, &ledger, &catalog, &profile());
        assert_eq!(rows[0].total_spent, 10.0);
        assert_eq!(rows[0].amount_per_point, Metric::Value(27.0));
    }

    #[test]
    fn test_rows_sorted_by_attributed_descending() {
        let mut totals = SpenderTotals::new();
        totals.add_attributed(100, 200);
        totals.add_attributed(900, 700);

        let ledger = FixedLedger(Vec::new());
        let mut catalog = AbilityCatalog::new();
        catalog.record(100, "Stormstrike");
        catalog.record(900, "Tempest Surge");

        let rows = spender_breakdown(&totals, &ledger, &catalog, &profile());
        assert_eq!(rows[0].ability_id, 900);
        assert_eq!(rows[1].ability_id, 100);
    }
}
