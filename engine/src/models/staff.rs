//! Staff model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Staff role; the role decides what a lifeline does on each visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Nurse,
    Doc,
    Cleaner,
    Oss,
}

impl StaffRole {
    /// Clinical roles perform hygiene checks and patient contact.
    pub fn is_clinical(self) -> bool {
        matches!(self, Self::Nurse | Self::Doc)
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Nurse => "NURSE",
            Self::Doc => "DOC",
            Self::Cleaner => "CLEANER",
            Self::Oss => "OSS",
        };
        f.write_str(tag)
    }
}

/// A staff member moving through the ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique staff identifier (e.g. "NURSE_0").
    pub id: String,
    pub role: StaffRole,
    /// Multiplier on the base hand-hygiene compliance, >= 0.
    pub compliance_modifier: f64,
    /// Fraction of a room's load removed per cleaning visit, in [0, 1].
    /// Resolved to [`Staff::DEFAULT_CLEANING_EFFICACY`] for cleaners
    /// configured without one.
    pub cleaning_efficacy: Option<f64>,
    /// Pathogen load on hands, always >= 0.
    pub hand_load: f64,
}

impl Staff {
    /// Cleaning efficacy assumed for a CLEANER when the scenario omits it.
    pub const DEFAULT_CLEANING_EFFICACY: f64 = 0.85;

    pub fn new(
        id: impl Into<String>,
        role: StaffRole,
        compliance_modifier: f64,
        cleaning_efficacy: Option<f64>,
    ) -> Self {
        let cleaning_efficacy = match (role, cleaning_efficacy) {
            (StaffRole::Cleaner, None) => Some(Self::DEFAULT_CLEANING_EFFICACY),
            (_, configured) => configured,
        };
        Self {
            id: id.into(),
            role,
            compliance_modifier,
            cleaning_efficacy,
            hand_load: 0.0,
        }
    }
}
