//! Hand-hygiene compliance gate.
//!
//! Each clinical visit brackets its patient contact with two hygiene
//! moments (WASH_IN before, WASH_OUT after). Every moment is one
//! stochastic compliance check drawing exactly one uniform sample from
//! the engine's RNG — call order therefore fixes the random stream.

use crate::config::HygieneConfig;
use crate::models::staff::Staff;
use crate::rng::RngManager;

/// Compliance probability is capped here no matter how large the
/// configured modifiers multiply out; even ideal wards miss occasionally.
pub const COMPLIANCE_CAP: f64 = 0.99;

/// One compliance check at a hygiene moment.
///
/// Target probability is `base_compliance * staff.compliance_modifier`,
/// additionally scaled by `isolation_modifier` when the visit happens in
/// an ISOLATION room, then capped at [`COMPLIANCE_CAP`]. On success the
/// staff member's hand load is multiplied by `1 - gel_log_reduction`
/// (a fractional reduction; see [`HygieneConfig::gel_log_reduction`]).
/// Failure leaves hands untouched.
///
/// Returns whether the check succeeded; the caller emits the HYGIENE
/// event since only it knows the moment (in/out) and the room.
pub fn perform_hygiene(
    staff: &mut Staff,
    in_isolation: bool,
    config: &HygieneConfig,
    rng: &mut RngManager,
) -> bool {
    let mut target = config.base_compliance * staff.compliance_modifier;
    if in_isolation {
        target *= config.isolation_modifier;
    }
    let target = target.min(COMPLIANCE_CAP);

    let success = rng.chance(target);
    if success {
        staff.hand_load *= 1.0 - config.gel_log_reduction;
    }
    success
}
