//! World Model Builder.
//!
//! Turns a validated [`ScenarioConfig`] into a populated [`WardState`]:
//! generated rooms, configured patients, expanded staffing. Runs exactly
//! once per simulation; after it returns, entity cardinality never
//! changes.

use crate::config::{ConfigError, MissingRoomPolicy, ScenarioConfig};
use crate::models::patient::Patient;
use crate::models::room::{Room, RoomType};
use crate::models::staff::Staff;
use crate::models::state::WardState;

/// Generated room id for 1-based position `n`: `R_01`, `R_02`, ...
fn room_id(n: usize) -> String {
    format!("R_{n:02}")
}

/// Build the ward from configuration.
///
/// Rooms get deterministic sequential ids; ids listed in
/// `hospital.isolation_ids` are typed ISOLATION, the rest SINGLE.
/// Patients are attached to their named rooms in list order; a reference
/// to a room outside the generated set is resolved per
/// [`MissingRoomPolicy`]. Each staffing entry of `(role, count)` expands
/// into `count` staff members sharing that entry's modifiers, with ids
/// `{ROLE}_{i}` — the resulting creation order is what the scheduler
/// uses as lifeline registration order.
pub fn build_world(config: &ScenarioConfig) -> Result<WardState, ConfigError> {
    let mut state = WardState::new();

    for n in 1..=config.hospital.rooms as usize {
        let id = room_id(n);
        let room_type = if config.hospital.isolation_ids.contains(&id) {
            RoomType::Isolation
        } else {
            RoomType::Single
        };
        state.add_room(Room::new(id, room_type));
    }

    for patient_cfg in &config.patients {
        if !state.has_room(&patient_cfg.room) {
            match config.missing_room_policy {
                MissingRoomPolicy::Reject => {
                    return Err(ConfigError::UnknownRoom {
                        patient: patient_cfg.id.clone(),
                        room: patient_cfg.room.clone(),
                    });
                }
                MissingRoomPolicy::AutoCreate => {
                    tracing::warn!(
                        patient = %patient_cfg.id,
                        room = %patient_cfg.room,
                        "configured room is not in the generated set; auto-creating it \
                         (missing_room_policy = AUTO_CREATE)"
                    );
                    state.add_room(Room::new(patient_cfg.room.clone(), RoomType::Single));
                }
            }
        }
        state.add_patient(Patient::new(
            patient_cfg.id.clone(),
            patient_cfg.room.clone(),
            patient_cfg.state,
            patient_cfg.susceptibility,
            patient_cfg.viral_load,
            patient_cfg.is_isolated,
        ));
    }

    for entry in &config.staffing {
        for i in 0..entry.count {
            state.add_staff(Staff::new(
                format!("{}_{}", entry.role, i),
                entry.role,
                entry.compliance_modifier,
                entry.cleaning_efficacy,
            ));
        }
    }

    Ok(state)
}
