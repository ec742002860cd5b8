//! Staff lifeline: the recurring per-staff activity.
//!
//! Each lifeline is a small WAIT -> ACT loop driven entirely by the event
//! clock — there are no coroutines. A wake resumes the lifeline in ACT:
//! it picks a room, emits a MOVE, runs its role branch, then draws the
//! next wait and goes back to WAIT by returning the delay for the
//! scheduler to queue. Lifelines never terminate on their own; they just
//! stop being resumed when the clock hits the ceiling.
//!
//! Role branches:
//! - NURSE / DOC: WASH_IN hygiene check, cross-contamination with the
//!   room and the co-located patient (if any), WASH_OUT hygiene check.
//! - CLEANER: multiplicative reduction of the room's surface load, one
//!   CLEANING event, no hygiene or contact steps.
//! - OSS: movement only.

use crate::config::{HygieneConfig, PathogenConfig};
use crate::engine::SimulationError;
use crate::models::event::{Event, EventLog, HygieneMoment};
use crate::models::staff::{Staff, StaffRole};
use crate::models::state::WardState;
use crate::processes::{contamination, ensure_load, hygiene};
use crate::rng::RngManager;

/// Shortest pause between visits, in ticks.
pub const MIN_VISIT_DELAY: i64 = 1;
/// Longest pause between visits, in ticks (inclusive).
pub const MAX_VISIT_DELAY: i64 = 3;

/// One staff member's scheduled activity.
#[derive(Debug, Clone, Copy)]
pub struct StaffLifeline {
    staff_index: usize,
}

impl StaffLifeline {
    pub fn new(staff_index: usize) -> Self {
        Self { staff_index }
    }

    /// Index into the ward's staff list this lifeline drives.
    pub fn staff_index(&self) -> usize {
        self.staff_index
    }

    /// Draw a visit pause in `[MIN_VISIT_DELAY, MAX_VISIT_DELAY]`.
    ///
    /// Also used at registration for the initial suspend, in creation
    /// order, before the clock starts.
    pub fn draw_delay(rng: &mut RngManager) -> u64 {
        rng.range(MIN_VISIT_DELAY, MAX_VISIT_DELAY + 1) as u64
    }

    /// One ACT phase. Returns the delay until the next wake.
    pub fn act(
        &self,
        now: u64,
        state: &mut WardState,
        pathogen: &PathogenConfig,
        hygiene_cfg: &HygieneConfig,
        rng: &mut RngManager,
        log: &mut EventLog,
    ) -> Result<u64, SimulationError> {
        let room_choice = rng.range(0, state.num_rooms() as i64) as usize;

        let (staff_id, role, efficacy) = {
            let staff = state
                .staff()
                .get(self.staff_index)
                .ok_or(SimulationError::StaffNotFound(self.staff_index))?;
            (staff.id.clone(), staff.role, staff.cleaning_efficacy)
        };
        let (room_id, in_isolation) = {
            let room = &state.rooms()[room_choice];
            (room.id.clone(), room.is_isolation())
        };

        log.log(Event::Move {
            tick: now,
            staff_id: staff_id.clone(),
            role,
            room_id: room_id.clone(),
        });

        match role {
            StaffRole::Cleaner => {
                let efficacy = efficacy.unwrap_or(Staff::DEFAULT_CLEANING_EFFICACY);
                let room = state
                    .room_mut(&room_id)
                    .ok_or_else(|| SimulationError::RoomNotFound(room_id.clone()))?;
                room.environmental_load *= 1.0 - efficacy;
                ensure_load(&room_id, room.environmental_load)?;

                log.log(Event::Cleaning {
                    tick: now,
                    staff_id,
                    room_id,
                });
            }
            StaffRole::Nurse | StaffRole::Doc => {
                let patient_id = state
                    .first_patient_in_room(&room_id)
                    .map(|p| p.id.clone());

                self.hygiene_moment(
                    now,
                    state,
                    hygiene_cfg,
                    rng,
                    log,
                    &staff_id,
                    &room_id,
                    in_isolation,
                    HygieneMoment::WashIn,
                )?;

                let report = {
                    let (staff, room, patient) = state
                        .contact_entities_mut(self.staff_index, &room_id, patient_id.as_deref())
                        .ok_or_else(|| SimulationError::RoomNotFound(room_id.clone()))?;
                    contamination::cross_contaminate(staff, room, patient, pathogen, rng)?
                };
                if report.infected {
                    if let Some(target_id) = &patient_id {
                        log.log(Event::Infection {
                            tick: now,
                            source_id: staff_id.clone(),
                            target_id: target_id.clone(),
                            room_id: room_id.clone(),
                        });
                    }
                }

                self.hygiene_moment(
                    now,
                    state,
                    hygiene_cfg,
                    rng,
                    log,
                    &staff_id,
                    &room_id,
                    in_isolation,
                    HygieneMoment::WashOut,
                )?;
            }
            StaffRole::Oss => {}
        }

        Ok(Self::draw_delay(rng))
    }

    #[allow(clippy::too_many_arguments)]
    fn hygiene_moment(
        &self,
        now: u64,
        state: &mut WardState,
        hygiene_cfg: &HygieneConfig,
        rng: &mut RngManager,
        log: &mut EventLog,
        staff_id: &str,
        room_id: &str,
        in_isolation: bool,
        moment: HygieneMoment,
    ) -> Result<(), SimulationError> {
        let staff = state
            .staff_mut()
            .get_mut(self.staff_index)
            .ok_or(SimulationError::StaffNotFound(self.staff_index))?;
        let success = hygiene::perform_hygiene(staff, in_isolation, hygiene_cfg, rng);
        log.log(Event::Hygiene {
            tick: now,
            staff_id: staff_id.to_string(),
            room_id: room_id.to_string(),
            moment,
            success,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patient::{Patient, PatientState};
    use crate::models::room::{Room, RoomType};

    fn single_room_ward(role: StaffRole) -> WardState {
        let mut state = WardState::new();
        let mut room = Room::new("R_01", RoomType::Single);
        room.environmental_load = 100.0;
        state.add_room(room);
        state.add_patient(Patient::new(
            "P_001",
            "R_01",
            PatientState::Susceptible,
            1.0,
            0.0,
            false,
        ));
        state.add_staff(Staff::new(format!("{role}_0"), role, 1.0, None));
        state
    }

    #[test]
    fn cleaner_visit_reduces_room_load() {
        let mut state = single_room_ward(StaffRole::Cleaner);
        let mut rng = RngManager::new(42);
        let mut log = EventLog::new();
        let lifeline = StaffLifeline::new(0);

        let delay = lifeline
            .act(
                5,
                &mut state,
                &PathogenConfig::default(),
                &HygieneConfig::default(),
                &mut rng,
                &mut log,
            )
            .unwrap();

        let expected = 100.0 * (1.0 - Staff::DEFAULT_CLEANING_EFFICACY);
        assert!((state.room("R_01").unwrap().environmental_load - expected).abs() < 1e-9);
        assert!((1..=3).contains(&delay));

        let types: Vec<&str> = log.events().iter().map(Event::event_type).collect();
        assert_eq!(types, vec!["MOVE", "CLEANING"]);
    }

    #[test]
    fn clinical_visit_brackets_contact_with_hygiene() {
        let mut state = single_room_ward(StaffRole::Nurse);
        let mut rng = RngManager::new(42);
        let mut log = EventLog::new();
        let lifeline = StaffLifeline::new(0);

        lifeline
            .act(
                3,
                &mut state,
                &PathogenConfig::default(),
                &HygieneConfig::default(),
                &mut rng,
                &mut log,
            )
            .unwrap();

        let types: Vec<&str> = log.events().iter().map(Event::event_type).collect();
        assert_eq!(types.first(), Some(&"MOVE"));
        let hygiene_events = log.events_of_type("HYGIENE");
        assert_eq!(hygiene_events.len(), 2);
        assert_eq!(hygiene_events[0].message().split('_').next(), Some("WASH"));
        // Nurse picked up load from the contaminated room.
        assert!(state.staff()[0].hand_load >= 0.0);
    }

    #[test]
    fn oss_visit_only_moves() {
        let mut state = single_room_ward(StaffRole::Oss);
        let mut rng = RngManager::new(42);
        let mut log = EventLog::new();
        let lifeline = StaffLifeline::new(0);

        lifeline
            .act(
                1,
                &mut state,
                &PathogenConfig::default(),
                &HygieneConfig::default(),
                &mut rng,
                &mut log,
            )
            .unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].event_type(), "MOVE");
        assert_eq!(state.staff()[0].hand_load, 0.0);
    }

    #[test]
    fn events_carry_the_resume_tick() {
        let mut state = single_room_ward(StaffRole::Doc);
        let mut rng = RngManager::new(9);
        let mut log = EventLog::new();

        StaffLifeline::new(0)
            .act(
                17,
                &mut state,
                &PathogenConfig::default(),
                &HygieneConfig::default(),
                &mut rng,
                &mut log,
            )
            .unwrap();

        assert!(log.events().iter().all(|e| e.tick() == 17));
    }
}
