//! Scenario configuration.
//!
//! The engine consumes one validated record describing the whole run; the
//! surrounding service owns parsing HTTP input into this shape. The JSON
//! layout matches the backend's scenario schema, with serde defaults
//! mirroring that schema's field defaults, so a stored scenario document
//! deserializes directly.
//!
//! Validation happens once, up front, and rejects bad configuration
//! instead of patching it: an invalid probability, a negative staffing
//! count or a duplicated patient id is a [`ConfigError`], not a silent
//! default. The one historically-implicit repair — creating a room a
//! patient references but the hospital section doesn't generate — is now
//! governed by an explicit [`MissingRoomPolicy`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::patient::PatientState;
use crate::models::staff::StaffRole;

/// Configuration rejected before the run starts.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("hospital.rooms must be at least 1")]
    NoRooms,

    #[error("simulation.max_ticks must be greater than zero")]
    ZeroTicks,

    #[error("simulation.tick_unit_minutes must be greater than zero")]
    ZeroTickUnit,

    #[error("staffing count for {role} must not be negative (got {count})")]
    NegativeStaffCount { role: StaffRole, count: i64 },

    #[error("{field} must be within [0, 1] (got {value})")]
    ProbabilityOutOfRange { field: String, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: String, value: f64 },

    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: String, value: f64 },

    #[error("duplicate patient id {0}")]
    DuplicatePatientId(String),

    #[error("patient {patient} references unknown room {room}")]
    UnknownRoom { patient: String, room: String },
}

/// How the world builder treats a patient whose room is not part of the
/// generated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingRoomPolicy {
    /// Create a SINGLE-typed room with the referenced id and log a warning.
    AutoCreate,
    /// Fail the build with [`ConfigError::UnknownRoom`].
    Reject,
}

impl Default for MissingRoomPolicy {
    fn default() -> Self {
        Self::AutoCreate
    }
}

/// Scenario identity and replay seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMeta {
    pub name: String,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub description: String,
}

/// Ward layout: generated room count plus which ids are isolation rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalConfig {
    pub rooms: u32,
    #[serde(default)]
    pub isolation_ids: Vec<String>,
}

/// One staffing entry, expanded into `count` staff members at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingConfig {
    pub role: StaffRole,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default = "default_unit")]
    pub compliance_modifier: f64,
    #[serde(default)]
    pub cleaning_efficacy: Option<f64>,
}

/// One configured patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientConfig {
    pub id: String,
    pub room: String,
    #[serde(default)]
    pub state: PatientState,
    #[serde(default = "default_susceptibility")]
    pub susceptibility: f64,
    #[serde(default)]
    pub viral_load: f64,
    #[serde(default)]
    pub is_isolated: bool,
}

/// Pathogen behavior: transmissibility and environmental persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathogenConfig {
    #[serde(rename = "type", default = "default_pathogen_type")]
    pub pathogen_type: String,
    #[serde(default = "default_transmission_prob")]
    pub transmission_prob: f64,
    /// Surface-load half-life, in hours.
    #[serde(default = "default_surface_half_life")]
    pub decay_surface_half_life_h: f64,
    /// Hand-load half-life, in minutes.
    #[serde(default = "default_hands_half_life")]
    pub decay_hands_half_life_m: f64,
}

impl Default for PathogenConfig {
    fn default() -> Self {
        Self {
            pathogen_type: default_pathogen_type(),
            transmission_prob: default_transmission_prob(),
            decay_surface_half_life_h: default_surface_half_life(),
            decay_hands_half_life_m: default_hands_half_life(),
        }
    }
}

/// Hand-hygiene compliance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygieneConfig {
    #[serde(default = "default_base_compliance")]
    pub base_compliance: f64,
    /// Compliance multiplier applied inside ISOLATION rooms.
    #[serde(default = "default_isolation_modifier")]
    pub isolation_modifier: f64,
    /// Fraction of hand load removed by a successful rub. Despite the
    /// name this is a plain fractional reduction, not a log-scale one;
    /// the wire name is kept for schema compatibility.
    #[serde(default = "default_gel_log_reduction")]
    pub gel_log_reduction: f64,
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            base_compliance: default_base_compliance(),
            isolation_modifier: default_isolation_modifier(),
            gel_log_reduction: default_gel_log_reduction(),
        }
    }
}

/// Run length and tick granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    /// Real-time minutes represented by one tick; converts the pathogen
    /// half-lives into tick units.
    #[serde(default = "default_tick_unit")]
    pub tick_unit_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            tick_unit_minutes: default_tick_unit(),
        }
    }
}

/// The complete validated scenario consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario_meta: ScenarioMeta,
    pub hospital: HospitalConfig,
    pub staffing: Vec<StaffingConfig>,
    pub patients: Vec<PatientConfig>,
    #[serde(default)]
    pub pathogen: PathogenConfig,
    #[serde(default)]
    pub hygiene: HygieneConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub missing_room_policy: MissingRoomPolicy,
}

impl ScenarioConfig {
    /// Validate everything that can be checked without building entities.
    ///
    /// Room references are resolved later by the world builder, which
    /// knows the generated id set and applies [`MissingRoomPolicy`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hospital.rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.simulation.max_ticks == 0 {
            return Err(ConfigError::ZeroTicks);
        }
        if self.simulation.tick_unit_minutes == 0 {
            return Err(ConfigError::ZeroTickUnit);
        }

        check_probability("pathogen.transmission_prob", self.pathogen.transmission_prob)?;
        check_positive(
            "pathogen.decay_surface_half_life_h",
            self.pathogen.decay_surface_half_life_h,
        )?;
        check_positive(
            "pathogen.decay_hands_half_life_m",
            self.pathogen.decay_hands_half_life_m,
        )?;

        check_probability("hygiene.base_compliance", self.hygiene.base_compliance)?;
        check_probability("hygiene.gel_log_reduction", self.hygiene.gel_log_reduction)?;
        check_non_negative("hygiene.isolation_modifier", self.hygiene.isolation_modifier)?;

        for entry in &self.staffing {
            if entry.count < 0 {
                return Err(ConfigError::NegativeStaffCount {
                    role: entry.role,
                    count: entry.count,
                });
            }
            check_non_negative(
                &format!("staffing[{}].compliance_modifier", entry.role),
                entry.compliance_modifier,
            )?;
            if let Some(efficacy) = entry.cleaning_efficacy {
                check_probability(&format!("staffing[{}].cleaning_efficacy", entry.role), efficacy)?;
            }
        }

        let mut seen = std::collections::HashSet::new();
        for patient in &self.patients {
            if !seen.insert(patient.id.as_str()) {
                return Err(ConfigError::DuplicatePatientId(patient.id.clone()));
            }
            check_probability(
                &format!("patients[{}].susceptibility", patient.id),
                patient.susceptibility,
            )?;
            check_non_negative(&format!("patients[{}].viral_load", patient.id), patient.viral_load)?;
        }

        Ok(())
    }
}

fn check_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn default_seed() -> u64 {
    42
}

fn default_count() -> i64 {
    1
}

fn default_unit() -> f64 {
    1.0
}

fn default_susceptibility() -> f64 {
    0.5
}

fn default_pathogen_type() -> String {
    "MRSA".to_string()
}

fn default_transmission_prob() -> f64 {
    0.15
}

fn default_surface_half_life() -> f64 {
    72.0
}

fn default_hands_half_life() -> f64 {
    60.0
}

fn default_base_compliance() -> f64 {
    0.6
}

fn default_isolation_modifier() -> f64 {
    1.5
}

fn default_gel_log_reduction() -> f64 {
    0.99
}

fn default_max_ticks() -> u64 {
    1000
}

fn default_tick_unit() -> u32 {
    10
}
