//! Simulation engine: the run loop and its checkpointing support.

pub mod checkpoint;
pub mod simulator;

pub use checkpoint::{scenario_hash, StateSnapshot};
pub use simulator::{RunSummary, Simulator};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a simulation.
///
/// There is no retry policy: the simulation is one deterministic pass,
/// and any failure aborts the whole run with no partial resume.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// The scenario failed validation before the run started.
    #[error("invalid scenario configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Internal staff reference broke (index out of range).
    #[error("staff index {0} out of range")]
    StaffNotFound(usize),

    /// Internal room reference broke.
    #[error("room {0} not found")]
    RoomNotFound(String),

    /// A load went negative or non-numeric at runtime; the state is
    /// corrupt and the run cannot continue.
    #[error("state invariant violated for {entity}: {detail}")]
    InvariantViolation { entity: String, detail: String },

    /// A snapshot was offered to a configuration it was not taken from.
    #[error("snapshot does not match scenario configuration (expected hash {expected}, got {actual})")]
    SnapshotMismatch { expected: String, actual: String },

    /// Snapshot serialization failed.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(String),
}
