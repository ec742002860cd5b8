//! Patient model.
//!
//! Patient state is monotonic as far as the engine is concerned: the only
//! transition it ever drives is SUSCEPTIBLE -> INFECTED. COLONIZED and
//! RECOVERED are accepted as configured initial states but no mechanic
//! produces or leaves them.

use serde::{Deserialize, Serialize};

/// Colonization/infection status of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientState {
    Susceptible,
    Colonized,
    Infected,
    Recovered,
}

impl Default for PatientState {
    fn default() -> Self {
        Self::Susceptible
    }
}

impl PatientState {
    /// Whether this state carries a saturated viral load from the start.
    pub fn is_carrier(self) -> bool {
        matches!(self, Self::Colonized | Self::Infected)
    }
}

/// A patient occupying exactly one room for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique patient identifier (e.g. "P_001").
    pub id: String,
    /// Room the patient occupies.
    pub room_id: String,
    /// Current colonization/infection status.
    pub state: PatientState,
    /// Probability multiplier for infection, in [0, 1].
    pub susceptibility: f64,
    /// Pathogen load carried by the patient, always >= 0.
    pub viral_load: f64,
    /// Contact-precaution flag from the scenario; informational.
    pub is_isolated: bool,
}

impl Patient {
    /// Viral load a patient jumps to on infection (and starts at when
    /// configured COLONIZED or INFECTED).
    pub const SATURATION_LOAD: f64 = 10_000.0;

    pub fn new(
        id: impl Into<String>,
        room_id: impl Into<String>,
        state: PatientState,
        susceptibility: f64,
        viral_load: f64,
        is_isolated: bool,
    ) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            state,
            susceptibility,
            viral_load: if state.is_carrier() {
                Self::SATURATION_LOAD
            } else {
                viral_load
            },
            is_isolated,
        }
    }

    /// Transition to INFECTED and saturate the viral load.
    pub fn infect(&mut self) {
        self.state = PatientState::Infected;
        self.viral_load = Self::SATURATION_LOAD;
    }
}
