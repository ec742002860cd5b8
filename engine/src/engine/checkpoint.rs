//! Checkpoint - save/restore a run mid-flight.
//!
//! A [`StateSnapshot`] captures everything the run loop depends on: the
//! clock position, pending wake entries, RNG state, and all entity
//! state. Restoring against the same scenario continues the run exactly
//! where it stopped — the determinism guarantee extends across the
//! snapshot boundary, which is also how it is tested.
//!
//! Snapshots embed a SHA-256 hash of the scenario JSON so a snapshot can
//! only be restored with the configuration that produced it; a mismatch
//! is rejected rather than silently producing a diverging run.
//!
//! The event log is *not* part of a snapshot: records already emitted
//! belong to the persistence layer, and a restored simulator starts with
//! an empty log that continues the original sequence.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::ScenarioConfig;
use crate::core::clock::{EventClock, WakeEntry};
use crate::engine::simulator::Simulator;
use crate::engine::SimulationError;
use crate::models::event::EventLog;
use crate::models::patient::Patient;
use crate::models::room::Room;
use crate::models::staff::Staff;
use crate::models::state::WardState;
use crate::processes::{DecayProcess, StaffLifeline};
use crate::rng::RngManager;

/// Complete mid-run state of a simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Clock position in ticks.
    pub current_tick: u64,
    /// RNG state; feeding it back resumes the stream exactly.
    pub rng_state: u64,
    /// Whether the run had already reached the ceiling.
    pub finished: bool,
    /// Pending wake entries in resume order.
    pub pending_wakes: Vec<WakeEntry>,
    /// All rooms in creation order.
    pub rooms: Vec<Room>,
    /// All patients in creation order.
    pub patients: Vec<Patient>,
    /// All staff in creation order.
    pub staff: Vec<Staff>,
    /// Records emitted so far; lets the host stitch log segments together.
    pub event_count: usize,
    /// SHA-256 of the scenario JSON this snapshot belongs to.
    pub config_hash: String,
}

/// SHA-256 hex digest of the scenario's JSON serialization.
pub fn scenario_hash(config: &ScenarioConfig) -> Result<String, SimulationError> {
    let bytes = serde_json::to_vec(config).map_err(|e| SimulationError::Snapshot(e.to_string()))?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

impl Simulator {
    /// Capture the current run state.
    pub fn snapshot(&self) -> Result<StateSnapshot, SimulationError> {
        Ok(StateSnapshot {
            current_tick: self.clock.now(),
            rng_state: self.rng.state(),
            finished: self.finished,
            pending_wakes: self.clock.pending(),
            rooms: self.state.rooms().to_vec(),
            patients: self.state.patients().to_vec(),
            staff: self.state.staff().to_vec(),
            event_count: self.event_log.len(),
            config_hash: scenario_hash(&self.config)?,
        })
    }

    /// Rebuild a simulator from a snapshot and the scenario it was taken
    /// from.
    ///
    /// The scenario is re-validated and its hash checked against the
    /// snapshot; a mismatch returns [`SimulationError::SnapshotMismatch`].
    /// The restored simulator continues with an empty event log.
    pub fn restore(
        config: ScenarioConfig,
        snapshot: StateSnapshot,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let expected = scenario_hash(&config)?;
        if expected != snapshot.config_hash {
            return Err(SimulationError::SnapshotMismatch {
                expected,
                actual: snapshot.config_hash,
            });
        }

        let state = WardState::from_parts(snapshot.rooms, snapshot.patients, snapshot.staff);
        let clock = EventClock::restore(
            config.simulation.max_ticks,
            snapshot.current_tick,
            snapshot.pending_wakes,
        );
        let decay = DecayProcess::new(&config.pathogen, &config.simulation);
        let lifelines = (0..state.num_staff()).map(StaffLifeline::new).collect();

        tracing::debug!(
            scenario = %config.scenario_meta.name,
            tick = snapshot.current_tick,
            "simulation restored from snapshot"
        );

        Ok(Self {
            config,
            state,
            clock,
            rng: RngManager::new(snapshot.rng_state),
            decay,
            lifelines,
            event_log: EventLog::new(),
            finished: snapshot.finished,
        })
    }
}
