//! Decay process: per-tick attenuation of environmental and hand loads.
//!
//! Wakes every tick and multiplies each load by a retention factor
//! derived from the configured half-life:
//!
//! ```text
//! factor = max(0, 1 - ln(2) / half_life_ticks)
//! ```
//!
//! This is the first-order linear approximation of exponential decay
//! (`exp(-ln2/hl) ≈ 1 - ln2/hl`). It is an intentional simplification,
//! accurate only while the per-tick decay rate is small: for half-lives
//! of at least 10 ticks the per-tick error stays under about 0.25%, and
//! for half-lives under `1/ln(2)` ticks the factor clamps to 0 and the
//! load vanishes in one step. Loads at or below a negligible threshold
//! are left untouched.

use std::f64::consts::LN_2;

use crate::config::{PathogenConfig, SimulationConfig};
use crate::engine::SimulationError;
use crate::models::state::WardState;
use crate::processes::ensure_load;

/// Loads at or below this are not worth decaying.
pub const NEGLIGIBLE_LOAD: f64 = 0.01;

/// Recurring decay sweep over every room surface and every pair of hands.
///
/// The two retention factors are fixed for the whole run, so they are
/// computed once from the pathogen half-lives and the tick duration.
#[derive(Debug, Clone, Copy)]
pub struct DecayProcess {
    surface_retention: f64,
    hands_retention: f64,
}

impl DecayProcess {
    pub fn new(pathogen: &PathogenConfig, simulation: &SimulationConfig) -> Self {
        let tick_minutes = f64::from(simulation.tick_unit_minutes);
        let surface_ticks = pathogen.decay_surface_half_life_h * 60.0 / tick_minutes;
        let hands_ticks = pathogen.decay_hands_half_life_m / tick_minutes;
        Self {
            surface_retention: Self::retention_factor(surface_ticks),
            hands_retention: Self::retention_factor(hands_ticks),
        }
    }

    /// Per-tick retention factor for a half-life expressed in ticks.
    pub fn retention_factor(half_life_ticks: f64) -> f64 {
        (1.0 - LN_2 / half_life_ticks).max(0.0)
    }

    /// Per-tick retention applied to room surfaces.
    pub fn surface_retention(&self) -> f64 {
        self.surface_retention
    }

    /// Per-tick retention applied to staff hands.
    pub fn hands_retention(&self) -> f64 {
        self.hands_retention
    }

    /// One decay sweep, iterating rooms and staff in creation order.
    pub fn apply(&self, state: &mut WardState) -> Result<(), SimulationError> {
        for room in state.rooms_mut() {
            if room.environmental_load > NEGLIGIBLE_LOAD {
                room.environmental_load *= self.surface_retention;
                ensure_load(&room.id, room.environmental_load)?;
            }
        }
        for staff in state.staff_mut() {
            if staff.hand_load > NEGLIGIBLE_LOAD {
                staff.hand_load *= self.hands_retention;
                ensure_load(&staff.id, staff.hand_load)?;
            }
        }
        Ok(())
    }
}
