//! Combat event model and replay-export ingestion
//!
//! - **combat_event**: the typed event vocabulary (Cast / Damage / Heal)
//! - **parser**: line parser for the replay-export format
//! - **catalog**: ability id → label mapping collected during parsing
//! - **error**: file-level ingestion errors

mod catalog;
mod combat_event;
mod error;
mod parser;

pub use catalog::AbilityCatalog;
pub use combat_event::{AbilityId, ActorId, CombatEvent, EventId, EventKind};
pub use error::RecordingError;
pub use parser::{Recording, RecordingParser};
