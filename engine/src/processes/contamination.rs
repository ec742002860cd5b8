//! Cross-contamination: load exchange and infection risk during a visit.
//!
//! Invoked once per clinical (NURSE/DOC) visit, between the WASH_IN and
//! WASH_OUT hygiene moments. Each stage is a simultaneous bidirectional
//! exchange computed from pre-stage values, so the update order inside a
//! stage cannot bias the result. Every entity only ever loses a fixed
//! fraction of its own load, which keeps all loads non-negative without
//! any clamping. There is no upper bound on loads other than the
//! infection saturation constant; with decay disabled, repeated infection
//! saturations can keep pumping load into the system over very long runs.
//!
//! The model assumes at most one patient per room: the caller passes the
//! first co-located patient in creation order, and any further occupants
//! of the same room are never contacted.

use crate::config::PathogenConfig;
use crate::engine::SimulationError;
use crate::models::patient::{Patient, PatientState};
use crate::models::room::Room;
use crate::models::staff::Staff;
use crate::processes::ensure_load;
use crate::rng::RngManager;

/// Fraction of the room's surface load picked up by hands.
pub const ROOM_TO_HANDS_FRACTION: f64 = 0.10;
/// Fraction of the hand load deposited onto room surfaces.
pub const HANDS_TO_ROOM_FRACTION: f64 = 0.05;
/// Fraction of the patient's load picked up by hands.
pub const PATIENT_TO_HANDS_FRACTION: f64 = 0.15;
/// Fraction of the hand load deposited onto the patient.
pub const HANDS_TO_PATIENT_FRACTION: f64 = 0.10;
/// Minimum deposited dose for an infection check to happen at all.
pub const INFECTIOUS_DOSE: f64 = 10.0;
/// Dose divisor in the infection probability.
pub const DOSE_SCALE: f64 = 1000.0;

/// What one contact did, for event emission and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactReport {
    /// Load deposited onto the patient (the infection-driving dose).
    pub patient_gain: f64,
    /// Whether the patient transitioned to INFECTED.
    pub infected: bool,
}

/// Run the two exchange stages and the infection check for one visit.
///
/// Stage 1 exchanges between room surfaces and hands; stage 2, only when
/// a patient is present, between hands and patient. Stage 3 rolls for
/// infection when the patient is SUSCEPTIBLE and the deposited dose
/// exceeds [`INFECTIOUS_DOSE`]:
///
/// ```text
/// p = min(1, (dose / 1000) * transmission_prob * susceptibility)
/// ```
///
/// On success the patient becomes INFECTED and the viral load snaps to
/// [`Patient::SATURATION_LOAD`].
pub fn cross_contaminate(
    staff: &mut Staff,
    room: &mut Room,
    patient: Option<&mut Patient>,
    pathogen: &PathogenConfig,
    rng: &mut RngManager,
) -> Result<ContactReport, SimulationError> {
    // Stage 1: room <-> hands, both flows from pre-stage values.
    let hands_pre = staff.hand_load;
    let room_pre = room.environmental_load;
    let room_to_hands = room_pre * ROOM_TO_HANDS_FRACTION;
    let hands_to_room = hands_pre * HANDS_TO_ROOM_FRACTION;
    staff.hand_load = hands_pre - hands_to_room + room_to_hands;
    room.environmental_load = room_pre - room_to_hands + hands_to_room;
    ensure_load(&staff.id, staff.hand_load)?;
    ensure_load(&room.id, room.environmental_load)?;

    let mut report = ContactReport::default();

    if let Some(patient) = patient {
        // Stage 2: hands <-> patient, both flows from post-stage-1 values.
        let hands_mid = staff.hand_load;
        let patient_pre = patient.viral_load;
        let patient_to_hands = patient_pre * PATIENT_TO_HANDS_FRACTION;
        let hands_to_patient = hands_mid * HANDS_TO_PATIENT_FRACTION;
        staff.hand_load = hands_mid - hands_to_patient + patient_to_hands;
        patient.viral_load = patient_pre - patient_to_hands + hands_to_patient;
        ensure_load(&staff.id, staff.hand_load)?;
        ensure_load(&patient.id, patient.viral_load)?;

        report.patient_gain = hands_to_patient;

        // Stage 3: infection roll, gated on state and deposited dose.
        if patient.state == PatientState::Susceptible && hands_to_patient > INFECTIOUS_DOSE {
            let p = ((hands_to_patient / DOSE_SCALE)
                * pathogen.transmission_prob
                * patient.susceptibility)
                .min(1.0);
            if rng.chance(p) {
                patient.infect();
                report.infected = true;
            }
        }
    }

    Ok(report)
}
