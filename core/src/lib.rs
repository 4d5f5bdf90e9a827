pub mod attribution;
pub mod combat_log;
pub mod links;
pub mod profile;
pub mod replay;
pub mod report;
pub mod resources;

// Re-exports for convenience
pub use attribution::{ChainAttribution, SpenderAttribution, SpenderTotals, resolve_chain};
pub use combat_log::{
    AbilityCatalog, AbilityId, ActorId, CombatEvent, EventId, EventKind, Recording,
    RecordingError, RecordingParser,
};
pub use links::{LinkGraph, link_kind};
pub use profile::{
    AttributionProfile, ChainProfile, PROFILE_DSL_VERSION, ProfileError, Substitution,
    load_profile,
};
pub use replay::{ReplayPass, default_actor};
pub use report::{Metric, SpenderRow, spender_breakdown};
pub use resources::{RecordedLedger, ResourceLedger, SpendRecord, SpenderStats};
