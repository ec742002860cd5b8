//! Simulator - main run loop.
//!
//! Wires every component together: builds the world, registers the decay
//! process and one lifeline per staff member with the event clock, then
//! resumes processes in wake order until the tick ceiling.
//!
//! # Determinism
//!
//! All randomness flows through one seeded [`RngManager`] owned by the
//! simulator instance and consumed strictly in resume order. Same
//! scenario + same seed = byte-identical event logs. Construction draws
//! the initial lifeline delays in creation order, so even the pre-run
//! stream position is fixed.
//!
//! # Example
//!
//! ```
//! use hai_simulator_core_rs::{ScenarioConfig, Simulator};
//!
//! let config: ScenarioConfig = serde_json::from_str(r#"{
//!     "scenario_meta": { "name": "Empty ward", "seed": 7 },
//!     "hospital": { "rooms": 1 },
//!     "staffing": [],
//!     "patients": [],
//!     "simulation": { "max_ticks": 10, "tick_unit_minutes": 10 }
//! }"#).unwrap();
//!
//! let mut sim = Simulator::new(config).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.ticks_simulated, 10);
//! assert_eq!(summary.event_count, 2); // START and END only
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::core::clock::EventClock;
use crate::engine::SimulationError;
use crate::models::event::{Event, EventLog, EventRecord};
use crate::models::state::WardState;
use crate::processes::{DecayProcess, StaffLifeline};
use crate::rng::RngManager;
use crate::world;

/// Registration-order process id of the decay sweep. Lifelines follow.
pub(crate) const DECAY_PROCESS_ID: usize = 0;
pub(crate) const LIFELINE_ID_BASE: usize = 1;

/// Output metadata handed to the persistence layer next to the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Virtual ticks covered by the run (the configured ceiling).
    pub ticks_simulated: u64,
    /// Total records in the event log, START and END included.
    pub event_count: usize,
}

/// A single ward simulation run.
pub struct Simulator {
    pub(crate) config: ScenarioConfig,
    pub(crate) state: WardState,
    pub(crate) clock: EventClock,
    pub(crate) rng: RngManager,
    pub(crate) decay: DecayProcess,
    pub(crate) lifelines: Vec<StaffLifeline>,
    pub(crate) event_log: EventLog,
    pub(crate) finished: bool,
}

impl Simulator {
    /// Validate the scenario, build the world and register all processes.
    ///
    /// Emits the START record; the first `run()`/`step()` call takes it
    /// from there. Fails fast on any configuration problem.
    pub fn new(config: ScenarioConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let state = world::build_world(&config)?;

        let mut rng = RngManager::new(config.scenario_meta.seed);
        let mut clock = EventClock::new(config.simulation.max_ticks);
        let decay = DecayProcess::new(&config.pathogen, &config.simulation);

        let mut event_log = EventLog::new();
        event_log.log(Event::Start { tick: 0 });

        // Registration order defines the same-tick tie-break: decay
        // first, then lifelines in staff creation order. Initial delays
        // are drawn here, in that same order.
        clock.schedule(DECAY_PROCESS_ID, 1);
        let mut lifelines = Vec::with_capacity(state.num_staff());
        for index in 0..state.num_staff() {
            lifelines.push(StaffLifeline::new(index));
            let delay = StaffLifeline::draw_delay(&mut rng);
            clock.schedule(LIFELINE_ID_BASE + index, delay);
        }

        tracing::debug!(
            scenario = %config.scenario_meta.name,
            seed = config.scenario_meta.seed,
            rooms = state.num_rooms(),
            patients = state.num_patients(),
            staff = state.num_staff(),
            "simulation initialized"
        );

        Ok(Self {
            config,
            state,
            clock,
            rng,
            decay,
            lifelines,
            event_log,
            finished: false,
        })
    }

    /// Resume exactly one process wake.
    ///
    /// Returns the tick that was resumed, or `None` once the clock has
    /// reached the ceiling (the END record is emitted at that point).
    pub fn step(&mut self) -> Result<Option<u64>, SimulationError> {
        if self.finished {
            return Ok(None);
        }
        let Some((tick, process)) = self.clock.next_wake() else {
            self.event_log.log(Event::End {
                tick: self.clock.now(),
            });
            self.finished = true;
            tracing::debug!(
                ticks = self.clock.now(),
                events = self.event_log.len(),
                "simulation finished"
            );
            return Ok(None);
        };

        let delay = if process == DECAY_PROCESS_ID {
            self.decay.apply(&mut self.state)?;
            1
        } else {
            let lifeline = self
                .lifelines
                .get(process - LIFELINE_ID_BASE)
                .copied()
                .ok_or(SimulationError::StaffNotFound(process - LIFELINE_ID_BASE))?;
            lifeline.act(
                tick,
                &mut self.state,
                &self.config.pathogen,
                &self.config.hygiene,
                &mut self.rng,
                &mut self.event_log,
            )?
        };
        self.clock.schedule(process, tick + delay);

        Ok(Some(tick))
    }

    /// Drive the run to the tick ceiling and return the summary.
    ///
    /// Calling again after completion just returns the summary.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        while self.step()?.is_some() {}
        Ok(self.summary())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks_simulated: self.clock.now(),
            event_count: self.event_log.len(),
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.now()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn state(&self) -> &WardState {
        &self.state
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Serialized event records in emission order.
    pub fn event_records(&self) -> Vec<EventRecord> {
        self.event_log.records()
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("scenario", &self.config.scenario_meta.name)
            .field("current_tick", &self.clock.now())
            .field("num_rooms", &self.state.num_rooms())
            .field("num_patients", &self.state.num_patients())
            .field("num_staff", &self.state.num_staff())
            .field("event_count", &self.event_log.len())
            .field("finished", &self.finished)
            .finish()
    }
}
