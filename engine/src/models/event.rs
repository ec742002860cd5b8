//! Event log: the simulation's only output.
//!
//! Events capture every observable action — staff movement, hygiene
//! checks, cleaning, infections — in emission order. The log is
//! append-only: no record is ever mutated or removed, which is what makes
//! replay comparison byte-exact. Every run is bracketed by a START record
//! (build completion) and an END record (clock ceiling reached).

use serde::{Deserialize, Serialize};

use crate::models::staff::StaffRole;

/// Mechanism tag recorded on infection events. Hand-borne transmission is
/// the only mechanism this engine models.
pub const MECHANISM_DIRECT_HANDS: &str = "DIRECT_HANDS";

/// Which of the two hand-hygiene moments a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HygieneMoment {
    /// Before patient contact.
    WashIn,
    /// After patient contact.
    WashOut,
}

impl HygieneMoment {
    pub fn label(self) -> &'static str {
        match self {
            Self::WashIn => "WASH_IN",
            Self::WashOut => "WASH_OUT",
        }
    }
}

/// A simulation event, tagged with the tick it occurred on.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// World build finished; the run is about to start.
    Start { tick: u64 },

    /// A staff member arrived in a room.
    Move {
        tick: u64,
        staff_id: String,
        role: StaffRole,
        room_id: String,
    },

    /// One hand-hygiene compliance check.
    Hygiene {
        tick: u64,
        staff_id: String,
        room_id: String,
        moment: HygieneMoment,
        success: bool,
    },

    /// A cleaner sanitized a room.
    Cleaning {
        tick: u64,
        staff_id: String,
        room_id: String,
    },

    /// A susceptible patient became infected during a contact.
    Infection {
        tick: u64,
        source_id: String,
        target_id: String,
        room_id: String,
    },

    /// The clock reached the tick ceiling.
    End { tick: u64 },
}

impl Event {
    /// Tick the event occurred on.
    pub fn tick(&self) -> u64 {
        match self {
            Event::Start { tick }
            | Event::Move { tick, .. }
            | Event::Hygiene { tick, .. }
            | Event::Cleaning { tick, .. }
            | Event::Infection { tick, .. }
            | Event::End { tick } => *tick,
        }
    }

    /// Wire tag for the event kind.
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Start { .. } => "START",
            Event::Move { .. } => "MOVE",
            Event::Hygiene { .. } => "HYGIENE",
            Event::Cleaning { .. } => "CLEANING",
            Event::Infection { .. } => "INFECTION",
            Event::End { .. } => "END",
        }
    }

    /// Human-readable message, stable across runs.
    pub fn message(&self) -> String {
        match self {
            Event::Start { .. } => "Simulation environment initialized".to_string(),
            Event::Move {
                staff_id,
                role,
                room_id,
                ..
            } => format!("{role} {staff_id} moved to {room_id}"),
            Event::Hygiene {
                moment, success, ..
            } => format!(
                "{}_{}",
                moment.label(),
                if *success { "SUCCESS" } else { "FAIL" }
            ),
            Event::Cleaning {
                staff_id, room_id, ..
            } => format!("{staff_id} cleaned {room_id}"),
            Event::Infection {
                source_id,
                target_id,
                ..
            } => format!("{target_id} infected by {source_id} via {MECHANISM_DIRECT_HANDS}"),
            Event::End { .. } => "Simulation Finished".to_string(),
        }
    }

    /// Staff member the event is about, when there is one.
    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Event::Move { staff_id, .. }
            | Event::Hygiene { staff_id, .. }
            | Event::Cleaning { staff_id, .. } => Some(staff_id),
            _ => None,
        }
    }

    /// Room the event happened in, when there is one.
    pub fn room_id(&self) -> Option<&str> {
        match self {
            Event::Move { room_id, .. }
            | Event::Hygiene { room_id, .. }
            | Event::Cleaning { room_id, .. }
            | Event::Infection { room_id, .. } => Some(room_id),
            _ => None,
        }
    }

    /// Serialized form consumed by the persistence layer.
    pub fn to_record(&self) -> EventRecord {
        let (source, target, mechanism) = match self {
            Event::Infection {
                source_id,
                target_id,
                ..
            } => (
                Some(source_id.clone()),
                Some(target_id.clone()),
                Some(MECHANISM_DIRECT_HANDS.to_string()),
            ),
            _ => (None, None, None),
        };
        EventRecord {
            t: round2(self.tick() as f64),
            event_type: self.event_type().to_string(),
            msg: self.message(),
            agent_id: self.agent_id().map(str::to_string),
            room: self.room_id().map(str::to_string),
            source,
            target,
            mechanism,
        }
    }
}

/// JSON-lines-compatible event record.
///
/// Times are rounded to 2 decimal places so serialized logs compare
/// stably across platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub t: f64,
    #[serde(rename = "type")]
    pub event_type: String,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
}

/// Round a clock value to 2 decimal places for serialization.
pub fn round2(t: f64) -> f64 {
    (t * 100.0).round() / 100.0
}

/// Append-only ordered event sink.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event. There is deliberately no way to remove or edit one.
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events with the given wire tag.
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events concerning a specific staff member.
    pub fn events_for_agent(&self, staff_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.agent_id() == Some(staff_id))
            .collect()
    }

    /// Serialized records in emission order.
    pub fn records(&self) -> Vec<EventRecord> {
        self.events.iter().map(Event::to_record).collect()
    }
}
