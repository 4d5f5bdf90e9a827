//! Sequential replay pass.
//!
//! Events are delivered one at a time, in stream order, synchronously. A
//! pass runs to completion over a fixed event list; a truncated recording
//! yields a partial aggregate, not an error.

use crate::attribution::{SpenderAttribution, SpenderTotals};
use crate::combat_log::{ActorId, EventKind, Recording};
use crate::profile::AttributionProfile;
use crate::resources::ResourceLedger;

/// One full attribution pass over a recording for one tracked actor.
///
/// Accumulators live inside the pass; replaying the same recording through
/// a fresh pass yields identical totals.
pub struct ReplayPass<'a> {
    profile: &'a AttributionProfile,
    actor_id: ActorId,
}

impl<'a> ReplayPass<'a> {
    pub fn new(profile: &'a AttributionProfile, actor_id: ActorId) -> Self {
        Self { profile, actor_id }
    }

    pub fn run(&self, recording: &Recording, ledger: &dyn ResourceLedger) -> SpenderTotals {
        let mut engine = SpenderAttribution::new(self.profile, self.actor_id);
        for event in &recording.events {
            engine.process_event(event, recording, ledger);
        }
        engine.into_totals()
    }
}

/// Fallback tracked actor: the source of the first cast in the recording.
pub fn default_actor(recording: &Recording) -> Option<ActorId> {
    recording
        .events
        .iter()
        .find(|event| event.kind == EventKind::Cast)
        .map(|event| event.source_id)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::combat_log::RecordingParser;
    use crate::profile::AttributionProfile;
    use crate::report::{Metric, spender_breakdown};
    use crate::resources::RecordedLedger;

    const EXPORT: &str = "\
[21:30:01.105] [Cast] [Korvash {101}] [Stormstrike {30123}] [E1]
[21:30:01.105] [Spend] [Korvash {101}] [Stormstrike {30123}] [5]
[21:30:01.322] [Damage] [Korvash {101}] [Stormstrike {30123}] [E2] (4210)
[-] [Link] [spender] [E1] [E2]
[21:30:02.000] [Cast] [Korvash {101}] [Stormstrike {30123}] [E3]
[21:30:02.450] [Damage] [Korvash {101}] [Stormstrike {30123}] [E4] (3900)
";

    fn profile() -> AttributionProfile {
        toml::from_str(
            r#"
            name = "storm weaver"
            eligible_abilities = [30123]
            "#,
        )
        .expect("valid profile")
    }

    fn parse() -> Recording {
        let session = NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        RecordingParser::new(session).parse_str(EXPORT)
    }

    #[test]
    fn test_full_pipeline_from_export_to_rows() {
        let recording = parse();
        let profile = profile();
        let actor = default_actor(&recording).expect("has a cast");
        assert_eq!(actor, 101);

        let ledger = RecordedLedger::from_recording(&recording, actor);
        let totals = ReplayPass::new(&profile, actor).run(&recording, &ledger);

        // only the flagged cast's damage is attributed
        assert_eq!(totals.attributed(30123), 4210);

        let rows = spender_breakdown(&totals, &ledger, &recording.catalog, &profile);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Stormstrike");
        assert_eq!(rows[0].casts, 2);
        assert_eq!(rows[0].total_spent, 5.0);
        assert_eq!(rows[0].amount_per_point, Metric::Value(842.0));
    }

    #[test]
    fn test_truncated_recording_yields_partial_aggregate() {
        // cut the stream after the first damage event
        let truncated: String = EXPORT.lines().take(4).collect::<Vec<_>>().join("\n");
        let session = NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let recording = RecordingParser::new(session).parse_str(&truncated);
        let profile = profile();

        let ledger = RecordedLedger::from_recording(&recording, 101);
        let totals = ReplayPass::new(&profile, 101).run(&recording, &ledger);
        assert_eq!(totals.attributed(30123), 4210);
    }
}
