//! PyO3 wrapper for the Simulator.
//!
//! The boundary is deliberately thin: the backend hands over the
//! validated scenario as a JSON string and gets the event log and run
//! summary back as JSON strings. Keeping the interface to strings and
//! scalars avoids per-field conversion code on both sides — the FastAPI
//! layer already speaks JSON for everything it persists.
//!
//! # Example (from Python)
//!
//! ```python
//! import json
//! from hai_simulator_core_rs import Simulator
//!
//! sim = Simulator(json.dumps(scenario.model_dump()))
//! summary = json.loads(sim.run())
//! events = json.loads(sim.events_json())
//! assert events[0]["type"] == "START"
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::ScenarioConfig;
use crate::engine::Simulator;

/// Python-facing simulation handle.
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    inner: Simulator,
}

#[pymethods]
impl PySimulator {
    /// Build a simulator from a scenario JSON document.
    ///
    /// Raises `ValueError` on malformed JSON or invalid configuration.
    #[new]
    fn new(scenario_json: &str) -> PyResult<Self> {
        let config: ScenarioConfig = serde_json::from_str(scenario_json)
            .map_err(|e| PyValueError::new_err(format!("invalid scenario JSON: {e}")))?;
        let inner = Simulator::new(config)
            .map_err(|e| PyValueError::new_err(format!("failed to initialize simulation: {e}")))?;
        Ok(Self { inner })
    }

    /// Run to the tick ceiling and return the run summary as JSON.
    ///
    /// Raises `RuntimeError` if a state invariant is violated mid-run.
    fn run(&mut self) -> PyResult<String> {
        let summary = self
            .inner
            .run()
            .map_err(|e| PyRuntimeError::new_err(format!("simulation run failed: {e}")))?;
        serde_json::to_string(&summary).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// The ordered event log as a JSON array of records.
    fn events_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner.event_records())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Number of events logged so far.
    fn event_count(&self) -> usize {
        self.inner.event_log().len()
    }

    /// Current virtual time in ticks.
    fn current_tick(&self) -> u64 {
        self.inner.current_tick()
    }

    /// Whether the run has reached the tick ceiling.
    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}
