//! HAI Simulator Core - Rust Engine
//!
//! Deterministic discrete-event simulator of pathogen transmission inside
//! a hospital ward: staff move between rooms, pick up and deposit load on
//! hands, surfaces and patients, and may trigger new infections — all
//! driven by one seeded random stream so a run is exactly replayable.
//!
//! # Architecture
//!
//! - **config**: validated scenario configuration (serde)
//! - **core**: discrete-event clock and wake queue
//! - **models**: domain types (Room, Patient, Staff, Event, WardState)
//! - **world**: entity construction from configuration
//! - **processes**: decay, hygiene gate, cross-contamination, lifelines
//! - **engine**: main run loop and checkpointing
//! - **rng**: deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All load fields stay >= 0 at every observable point
//! 2. All randomness is deterministic (engine-owned seeded RNG)
//! 3. The event log is append-only and bracketed by START/END
//!
//! The engine performs no I/O of its own: it consumes an
//! already-validated [`ScenarioConfig`] and produces an ordered event
//! log plus a [`RunSummary`]. HTTP, persistence and orchestration belong
//! to the surrounding service.

// Module declarations
pub mod config;
pub mod core;
pub mod engine;
pub mod models;
pub mod processes;
pub mod rng;
pub mod world;

// Re-exports for convenience
pub use config::{
    ConfigError, HospitalConfig, HygieneConfig, MissingRoomPolicy, PathogenConfig, PatientConfig,
    ScenarioConfig, ScenarioMeta, SimulationConfig, StaffingConfig,
};
pub use crate::core::clock::{EventClock, WakeEntry};
pub use engine::{scenario_hash, RunSummary, SimulationError, Simulator, StateSnapshot};
pub use models::{
    Event, EventLog, EventRecord, HygieneMoment, Patient, PatientState, Room, RoomType, Staff,
    StaffRole, WardState, MECHANISM_DIRECT_HANDS,
};
pub use processes::{cross_contaminate, perform_hygiene, ContactReport, DecayProcess, StaffLifeline};
pub use rng::RngManager;
pub use world::build_world;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn hai_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::PySimulator>()?;
    Ok(())
}
