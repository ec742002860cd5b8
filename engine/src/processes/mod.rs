//! Scheduled processes: the activities the event clock interleaves.
//!
//! Every process suspends only at its declared wake point (a tick-count
//! timeout) and never mid-computation, so entity mutation is atomic with
//! respect to the other processes and no locking exists anywhere.

pub mod contamination;
pub mod decay;
pub mod hygiene;
pub mod lifeline;

pub use contamination::{cross_contaminate, ContactReport};
pub use decay::DecayProcess;
pub use hygiene::perform_hygiene;
pub use lifeline::StaffLifeline;

use crate::engine::SimulationError;

/// Guard a freshly computed load value.
///
/// A negative or non-numeric load means the run's state is corrupt; the
/// simulation aborts immediately rather than continuing (there is no
/// retry or partial resume).
pub(crate) fn ensure_load(entity: &str, value: f64) -> Result<(), SimulationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::InvariantViolation {
            entity: entity.to_string(),
            detail: format!("load became {value}"),
        });
    }
    Ok(())
}
