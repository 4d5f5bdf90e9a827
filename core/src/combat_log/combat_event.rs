use chrono::NaiveDateTime;

/// Index of an event within its recording's event list.
pub type EventId = usize;

pub type AbilityId = i64;
pub type ActorId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Cast,
    Damage,
    Heal,
}

/// One element of the replayed event stream.
///
/// Events are produced once by the exporter and never mutated afterwards;
/// the attribution engine only reads them.
#[derive(Debug, Clone)]
pub struct CombatEvent {
    pub event_id: EventId,
    pub kind: EventKind,
    pub timestamp: NaiveDateTime,
    pub source_id: ActorId,
    pub ability_id: AbilityId,
    /// Outcome amount. `None` on casts.
    pub amount: Option<i64>,
}

impl CombatEvent {
    pub fn is_cast(&self) -> bool {
        self.kind == EventKind::Cast
    }

    pub fn is_outcome(&self) -> bool {
        matches!(self.kind, EventKind::Damage | EventKind::Heal)
    }
}
