//! Replay-export parser.
//!
//! Reads the line-oriented export produced by the upstream normalizer:
//! events, resource spends, and the causal links between events, already
//! materialized. Every line carries exactly five bracket-delimited
//! segments:
//!
//! ```text
//! [21:30:01.105] [Cast] [Korvash {101}] [Stormstrike {30123}] [E1]
//! [21:30:01.322] [Damage] [Korvash {101}] [Stormstrike {30123}] [E2] (4210)
//! [21:30:01.105] [Spend] [Korvash {101}] [Stormstrike {30123}] [5]
//! [-] [Link] [spender] [E1] [E2]
//! ```
//!
//! `E<n>` tokens name events within one export; links may reference events
//! that appear later in the file. Lines that do not parse are skipped.

use std::path::Path;

use chrono::{Days, NaiveDateTime};
use hashbrown::HashMap;
use memchr::{memchr, memchr_iter};

use crate::links::LinkGraph;
use crate::resources::SpendRecord;

use super::{AbilityCatalog, AbilityId, ActorId, CombatEvent, EventKind, RecordingError};


/// A fully ingested replay export, immutable for the lifetime of a pass.
#[derive(Debug, Default)]
pub struct Recording {
    pub events: Vec<CombatEvent>,
    pub links: LinkGraph,
    pub spends: Vec<SpendRecord>,
    pub catalog: AbilityCatalog,
}

/// One parsed line, before event tokens are resolved.
#[derive(Debug)]
enum Record {
    Event {
        token: u64,
        kind: EventKind,
        timestamp: NaiveDateTime,
        source_id: ActorId,
        ability_id: AbilityId,
        ability_label: String,
        amount: Option<i64>,
    },
    Spend {
        timestamp: NaiveDateTime,
        source_id: ActorId,
        ability_id: AbilityId,
        ability_label: String,
        amount: f64,
    },
    Link {
        kind: String,
        from: u64,
        to: u64,
    },
}

pub struct RecordingParser {
    session_date: NaiveDateTime,
}

impl RecordingParser {
    /// `session_date` anchors the time-of-day stamps in the export; times
    /// earlier than its time of day roll over to the next calendar day.
    pub fn new(session_date: NaiveDateTime) -> Self {
        Self { session_date }
    }

    pub fn parse_file(&self, path: &Path) -> Result<Recording, RecordingError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| RecordingError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let recording = self.parse_str(&content);
        tracing::debug!(
            path = %path.display(),
            events = recording.events.len(),
            spends = recording.spends.len(),
            "ingested recording"
        );
        Ok(recording)
    }

    /// Parse an export from memory. Links are resolved after all lines are
    /// read so they may reference events further down the file; link
    /// registration order is the order of the link lines themselves.
    pub fn parse_str(&self, content: &str) -> Recording {
        let records: Vec<Record> = content
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect();

        let mut recording = Recording::default();
        let mut tokens: HashMap<u64, usize> = HashMap::new();

        for record in &records {
            if let Record::Event {
                token,
                kind,
                timestamp,
                source_id,
                ability_id,
                ability_label,
                amount,
            } = record
            {
                let event_id = recording.events.len();
                tokens.insert(*token, event_id);
                recording.catalog.record(*ability_id, ability_label);
                recording.events.push(CombatEvent {
                    event_id,
                    kind: *kind,
                    timestamp: *timestamp,
                    source_id: *source_id,
                    ability_id: *ability_id,
                    amount: *amount,
                });
            }
        }

        for record in records {
            match record {
                Record::Event { .. } => {}
                Record::Spend {
                    timestamp,
                    source_id,
                    ability_id,
                    ability_label,
                    amount,
                } => {
                    recording.catalog.record(ability_id, &ability_label);
                    recording.spends.push(SpendRecord {
                        timestamp,
                        source_id,
                        ability_id,
                        amount,
                    });
                }
                Record::Link { kind, from, to } => {
                    match (tokens.get(&from), tokens.get(&to)) {
                        (Some(&from_id), Some(&to_id)) => {
                            recording.links.insert(from_id, &kind, to_id);
                        }
                        _ => {
                            tracing::warn!(
                                kind = %kind,
                                from,
                                to,
                                "link references unknown event token"
                            );
                        }
                    }
                }
            }
        }

        recording
    }

    fn parse_line(&self, line: &str) -> Option<Record> {
        let b = line.as_bytes();
        let brackets: Vec<usize> = memchr_iter(b'[', b).collect();
        let end_brackets: Vec<usize> = memchr_iter(b']', b).collect();

        // throw away lines w/ != 5 bracket delimited segments
        if brackets.len() != 5 || end_brackets.len() != 5 {
            return None;
        }

        let time_segment = &line[brackets[0] + 1..end_brackets[0]];
        let kind_segment = &line[brackets[1] + 1..end_brackets[1]];
        let actor_segment = &line[brackets[2] + 1..end_brackets[2]];
        let ability_segment = &line[brackets[3] + 1..end_brackets[3]];
        let detail_segment = &line[brackets[4] + 1..end_brackets[4]];
        let trailing = &line[end_brackets[4] + 1..];

        let kind = match kind_segment {
            "Cast" => EventKind::Cast,
            "Damage" => EventKind::Damage,
            "Heal" => EventKind::Heal,
            "Spend" => {
                return self.parse_spend(time_segment, actor_segment, ability_segment, detail_segment);
            }
            "Link" => return Self::parse_link(actor_segment, ability_segment, detail_segment),
            _ => return None,
        };

        let timestamp = self.parse_timestamp(time_segment)?;
        let (_, source_id) = parse_tagged(actor_segment)?;
        let (ability_label, ability_id) = parse_tagged(ability_segment)?;
        let token = parse_event_token(detail_segment)?;
        let amount = match kind {
            EventKind::Cast => None,
            EventKind::Damage | EventKind::Heal => Some(parse_amount(trailing)),
        };

        Some(Record::Event {
            token,
            kind,
            timestamp,
            source_id,
            ability_id,
            ability_label: ability_label.to_string(),
            amount,
        })
    }

    fn parse_spend(
        &self,
        time_segment: &str,
        actor_segment: &str,
        ability_segment: &str,
        amount_segment: &str,
    ) -> Option<Record> {
        let timestamp = self.parse_timestamp(time_segment)?;
        let (_, source_id) = parse_tagged(actor_segment)?;
        let (ability_label, ability_id) = parse_tagged(ability_segment)?;
        let amount = amount_segment.trim().parse::<f64>().ok()?;
        Some(Record::Spend {
            timestamp,
            source_id,
            ability_id,
            ability_label: ability_label.to_string(),
            amount,
        })
    }

    // `[-] [Link] [kind] [E<from>] [E<to>]`, the time segment is unused
    fn parse_link(
        kind_segment: &str,
        from_segment: &str,
        to_segment: &str,
    ) -> Option<Record> {
        let kind = kind_segment.trim();
        if kind.is_empty() {
            return None;
        }
        let from = parse_event_token(from_segment)?;
        let to = parse_event_token(to_segment)?;
        Some(Record::Link {
            kind: kind.to_string(),
            from,
            to,
        })
    }

    // parse HH:MM:SS.mmm
    fn parse_timestamp(&self, segment: &str) -> Option<NaiveDateTime> {
        let b = segment.as_bytes();
        if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b'.' {
            return None;
        }

        let hour = (b[0] - b'0') * 10 + (b[1] - b'0');
        let minute = (b[3] - b'0') * 10 + (b[4] - b'0');
        let second = (b[6] - b'0') * 10 + (b[7] - b'0');
        let millis =
            (b[9] - b'0') as u16 * 100 + (b[10] - b'0') as u16 * 10 + (b[11] - b'0') as u16;

        let time = chrono::NaiveTime::from_hms_milli_opt(
            hour as u32,
            minute as u32,
            second as u32,
            millis as u32,
        )?;

        // times before the session start belong to the next day
        if time
            .signed_duration_since(self.session_date.time())
            .num_milliseconds()
            < 0
        {
            self.session_date
                .date()
                .and_time(time)
                .checked_add_days(Days::new(1))
        } else {
            Some(self.session_date.date().and_time(time))
        }
    }
}

// parse `Name {id}`
fn parse_tagged(segment: &str) -> Option<(&str, i64)> {
    let bytes = segment.as_bytes();
    let brace = memchr(b'{', bytes)?;
    let end_brace = memchr(b'}', bytes)?;
    if end_brace <= brace {
        return None;
    }
    let name = segment[..brace].trim();
    let id = segment[brace + 1..end_brace].trim().parse::<i64>().ok()?;
    Some((name, id))
}

// parse `E<n>`
fn parse_event_token(segment: &str) -> Option<u64> {
    let rest = segment.trim().strip_prefix('E')?;
    rest.parse::<u64>().ok()
}

// parse trailing ` (4210)`, defaulting to 0 like other malformed values
fn parse_amount(trailing: &str) -> i64 {
    let bytes = trailing.as_bytes();
    let open = memchr(b'(', bytes);
    let close = memchr(b')', bytes);
    match (open, close) {
        (Some(open), Some(close)) if close > open => trailing[open + 1..close]
            .trim()
            .parse::<i64>()
            .unwrap_or_default(),
        _ => 0,
    }
}
