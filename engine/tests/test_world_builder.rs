//! Tests for the world model builder: entity construction, isolation
//! typing, staffing expansion, and the missing-room policy.

use hai_simulator_core_rs::{
    build_world, ConfigError, MissingRoomPolicy, Patient, PatientState, RoomType, ScenarioConfig,
    Staff, StaffRole,
};

fn scenario(json: &str) -> ScenarioConfig {
    serde_json::from_str(json).expect("valid scenario JSON")
}

#[test]
fn generated_rooms_are_sequential_and_typed() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Ward layout" },
            "hospital": { "rooms": 4, "isolation_ids": ["R_01", "R_03"] },
            "staffing": [],
            "patients": []
        }"#,
    );
    let state = build_world(&config).unwrap();

    assert_eq!(state.num_rooms(), 4);
    let ids: Vec<&str> = state.rooms().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["R_01", "R_02", "R_03", "R_04"]);
    assert_eq!(state.room("R_01").unwrap().room_type, RoomType::Isolation);
    assert_eq!(state.room("R_02").unwrap().room_type, RoomType::Single);
    assert_eq!(state.room("R_03").unwrap().room_type, RoomType::Isolation);
    assert!(state
        .rooms()
        .iter()
        .all(|r| r.environmental_load == 0.0));
}

#[test]
fn patients_attach_to_their_rooms_in_list_order() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Patients" },
            "hospital": { "rooms": 2 },
            "staffing": [],
            "patients": [
                { "id": "P_INDEX", "room": "R_01", "state": "INFECTED", "susceptibility": 1.0 },
                { "id": "P_001", "room": "R_02", "state": "SUSCEPTIBLE", "susceptibility": 0.9 }
            ]
        }"#,
    );
    let state = build_world(&config).unwrap();

    assert_eq!(state.num_patients(), 2);
    let index_patient = state.patient("P_INDEX").unwrap();
    assert_eq!(index_patient.state, PatientState::Infected);
    assert_eq!(index_patient.viral_load, Patient::SATURATION_LOAD);
    assert_eq!(index_patient.room_id, "R_01");

    let p001 = state.patient("P_001").unwrap();
    assert_eq!(p001.viral_load, 0.0);
    assert_eq!(p001.susceptibility, 0.9);

    assert_eq!(
        state.first_patient_in_room("R_01").map(|p| p.id.as_str()),
        Some("P_INDEX")
    );
}

#[test]
fn colonized_patients_also_start_saturated() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Carrier" },
            "hospital": { "rooms": 1 },
            "staffing": [],
            "patients": [ { "id": "P_C", "room": "R_01", "state": "COLONIZED" } ]
        }"#,
    );
    let state = build_world(&config).unwrap();
    assert_eq!(
        state.patient("P_C").unwrap().viral_load,
        Patient::SATURATION_LOAD
    );
    assert_eq!(state.patient("P_C").unwrap().state, PatientState::Colonized);
}

#[test]
fn staffing_expands_counts_into_individuals() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Roster" },
            "hospital": { "rooms": 1 },
            "staffing": [
                { "role": "NURSE", "count": 3, "compliance_modifier": 1.2 },
                { "role": "DOC", "count": 1 },
                { "role": "CLEANER", "count": 2, "cleaning_efficacy": 0.5 }
            ],
            "patients": []
        }"#,
    );
    let state = build_world(&config).unwrap();

    let ids: Vec<&str> = state.staff().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["NURSE_0", "NURSE_1", "NURSE_2", "DOC_0", "CLEANER_0", "CLEANER_1"]
    );
    assert!(state
        .staff()
        .iter()
        .take(3)
        .all(|s| s.compliance_modifier == 1.2 && s.role == StaffRole::Nurse));
    assert_eq!(state.staff()[4].cleaning_efficacy, Some(0.5));
    assert!(state.staff().iter().all(|s| s.hand_load == 0.0));
}

#[test]
fn cleaner_without_efficacy_gets_the_default() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Default efficacy" },
            "hospital": { "rooms": 1 },
            "staffing": [ { "role": "CLEANER" } ],
            "patients": []
        }"#,
    );
    let state = build_world(&config).unwrap();
    assert_eq!(
        state.staff()[0].cleaning_efficacy,
        Some(Staff::DEFAULT_CLEANING_EFFICACY)
    );
}

#[test]
fn zero_count_entry_creates_no_staff() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Ghost shift" },
            "hospital": { "rooms": 1 },
            "staffing": [ { "role": "OSS", "count": 0 } ],
            "patients": []
        }"#,
    );
    assert!(config.validate().is_ok());
    let state = build_world(&config).unwrap();
    assert_eq!(state.num_staff(), 0);
}

#[test]
fn auto_create_policy_materializes_missing_rooms() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Fallback" },
            "hospital": { "rooms": 1 },
            "staffing": [],
            "patients": [ { "id": "P_LOST", "room": "R_77" } ]
        }"#,
    );
    assert_eq!(config.missing_room_policy, MissingRoomPolicy::AutoCreate);

    let state = build_world(&config).unwrap();
    assert_eq!(state.num_rooms(), 2);
    assert_eq!(state.room("R_77").unwrap().room_type, RoomType::Single);
    assert_eq!(state.patient("P_LOST").unwrap().room_id, "R_77");
}

#[test]
fn reject_policy_fails_on_missing_rooms() {
    let config = scenario(
        r#"{
            "scenario_meta": { "name": "Strict" },
            "hospital": { "rooms": 1 },
            "staffing": [],
            "patients": [ { "id": "P_LOST", "room": "R_77" } ],
            "missing_room_policy": "REJECT"
        }"#,
    );
    assert_eq!(
        build_world(&config).unwrap_err(),
        ConfigError::UnknownRoom {
            patient: "P_LOST".to_string(),
            room: "R_77".to_string(),
        }
    );
}

#[test]
fn validation_rejects_bad_configs_before_build() {
    let mut config = scenario(
        r#"{
            "scenario_meta": { "name": "Bad" },
            "hospital": { "rooms": 1 },
            "staffing": [ { "role": "NURSE", "count": -1 } ],
            "patients": []
        }"#,
    );
    assert_eq!(
        config.validate(),
        Err(ConfigError::NegativeStaffCount {
            role: StaffRole::Nurse,
            count: -1
        })
    );

    config.staffing.clear();
    config.hygiene.base_compliance = 2.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ProbabilityOutOfRange { .. })
    ));
}
