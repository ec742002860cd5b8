//! End-to-end engine tests on the reference scenario: deterministic
//! replay, log bracketing, monotone clock, load non-negativity and
//! infection gating.

use hai_simulator_core_rs::{PatientState, ScenarioConfig, Simulator};

/// The reference two-room scenario: one isolation room with the index
/// patient, one susceptible patient, a nurse and a cleaner.
fn base_scenario() -> ScenarioConfig {
    serde_json::from_str(
        r#"{
            "scenario_meta": { "name": "Test Scenario", "seed": 42 },
            "hospital": { "rooms": 2, "isolation_ids": ["R_01"] },
            "staffing": [
                { "role": "NURSE", "count": 1, "compliance_modifier": 1.0 },
                { "role": "CLEANER", "count": 1, "cleaning_efficacy": 0.85 }
            ],
            "patients": [
                { "id": "P_INDEX", "room": "R_01", "state": "INFECTED", "susceptibility": 1.0 },
                { "id": "P_001", "room": "R_02", "state": "SUSCEPTIBLE", "susceptibility": 0.9 }
            ],
            "pathogen": {
                "type": "MRSA", "transmission_prob": 0.5, "decay_surface_half_life_h": 72
            },
            "hygiene": {
                "base_compliance": 0.5, "gel_log_reduction": 0.99
            },
            "simulation": { "max_ticks": 50, "tick_unit_minutes": 10 }
        }"#,
    )
    .expect("valid scenario JSON")
}

#[test]
fn identical_seeds_replay_byte_identically() {
    let mut first = Simulator::new(base_scenario()).unwrap();
    let summary_1 = first.run().unwrap();

    let mut second = Simulator::new(base_scenario()).unwrap();
    let summary_2 = second.run().unwrap();

    assert_eq!(summary_1, summary_2);
    assert_eq!(first.event_records(), second.event_records());

    // Byte-identical once serialized, not merely equal in memory.
    let json_1 = serde_json::to_string(&first.event_records()).unwrap();
    let json_2 = serde_json::to_string(&second.event_records()).unwrap();
    assert_eq!(json_1, json_2);
}

#[test]
fn log_is_bracketed_by_start_and_end() {
    let mut sim = Simulator::new(base_scenario()).unwrap();
    sim.run().unwrap();

    let records = sim.event_records();
    assert!(records.len() >= 2);
    assert_eq!(records.first().unwrap().event_type, "START");
    assert_eq!(records.first().unwrap().t, 0.0);
    assert_eq!(records.last().unwrap().event_type, "END");
    assert_eq!(records.last().unwrap().t, 50.0);
    // Exactly one of each bracket.
    assert_eq!(records.iter().filter(|r| r.event_type == "START").count(), 1);
    assert_eq!(records.iter().filter(|r| r.event_type == "END").count(), 1);
}

#[test]
fn event_times_never_decrease() {
    let mut sim = Simulator::new(base_scenario()).unwrap();
    sim.run().unwrap();

    let records = sim.event_records();
    for pair in records.windows(2) {
        assert!(
            pair[0].t <= pair[1].t,
            "event times went backwards: {} then {}",
            pair[0].t,
            pair[1].t
        );
    }
}

#[test]
fn all_loads_stay_non_negative() {
    let mut sim = Simulator::new(base_scenario()).unwrap();

    // Check after every single process resume, not just at the end.
    loop {
        let stepped = sim.step().unwrap();
        for room in sim.state().rooms() {
            assert!(room.environmental_load >= 0.0, "room {} went negative", room.id);
        }
        for patient in sim.state().patients() {
            assert!(patient.viral_load >= 0.0, "patient {} went negative", patient.id);
        }
        for staff in sim.state().staff() {
            assert!(staff.hand_load >= 0.0, "staff {} went negative", staff.id);
        }
        if stepped.is_none() {
            break;
        }
    }
}

#[test]
fn infected_patients_never_revert() {
    let mut sim = Simulator::new(base_scenario()).unwrap();
    sim.run().unwrap();

    assert_eq!(
        sim.state().patient("P_INDEX").unwrap().state,
        PatientState::Infected
    );
}

#[test]
fn zero_transmission_means_zero_infections() {
    let mut config = base_scenario();
    config.pathogen.transmission_prob = 0.0;

    let mut sim = Simulator::new(config).unwrap();
    sim.run().unwrap();

    assert!(sim.event_log().events_of_type("INFECTION").is_empty());
    assert_eq!(
        sim.state().patient("P_001").unwrap().state,
        PatientState::Susceptible
    );
}

#[test]
fn zero_susceptibility_means_zero_infections() {
    let mut config = base_scenario();
    for patient in &mut config.patients {
        patient.susceptibility = 0.0;
    }

    let mut sim = Simulator::new(config).unwrap();
    sim.run().unwrap();

    assert!(sim.event_log().events_of_type("INFECTION").is_empty());
}

#[test]
fn zero_compliance_never_produces_wash_success() {
    let mut config = base_scenario();
    config.hygiene.base_compliance = 0.0;

    let mut sim = Simulator::new(config).unwrap();
    sim.run().unwrap();

    let successes = sim
        .event_records()
        .iter()
        .filter(|r| r.msg == "WASH_IN_SUCCESS" || r.msg == "WASH_OUT_SUCCESS")
        .count();
    assert_eq!(successes, 0);
    // The checks themselves still happen and fail.
    assert!(!sim.event_log().events_of_type("HYGIENE").is_empty());
}

#[test]
fn full_compliance_failures_stay_under_ten_percent() {
    let mut config = base_scenario();
    config.hygiene.base_compliance = 1.0;

    let mut sim = Simulator::new(config).unwrap();
    sim.run().unwrap();

    let hygiene: Vec<_> = sim
        .event_records()
        .into_iter()
        .filter(|r| r.event_type == "HYGIENE")
        .collect();
    assert!(!hygiene.is_empty());
    let failures = hygiene.iter().filter(|r| r.msg.ends_with("FAIL")).count();
    assert!(
        (failures as f64) <= (hygiene.len() as f64) * 0.10,
        "{failures} failures out of {} hygiene events",
        hygiene.len()
    );
}

#[test]
fn changing_the_seed_keeps_the_bracketing() {
    let mut config = base_scenario();
    config.scenario_meta.seed = 43;

    let mut sim = Simulator::new(config).unwrap();
    let summary = sim.run().unwrap();

    let records = sim.event_records();
    assert_eq!(records.first().unwrap().event_type, "START");
    assert_eq!(records.last().unwrap().event_type, "END");
    assert_eq!(summary.ticks_simulated, 50);
}

#[test]
fn cleaner_visits_reduce_room_load_events() {
    let mut sim = Simulator::new(base_scenario()).unwrap();
    sim.run().unwrap();

    // A cleaner walking for 50 ticks with 1-3 tick pauses must have
    // cleaned at least once, and each cleaning follows its MOVE.
    let cleanings = sim.event_log().events_of_type("CLEANING");
    assert!(!cleanings.is_empty());
    assert!(sim
        .event_log()
        .events_for_agent("CLEANER_0")
        .iter()
        .any(|e| e.event_type() == "MOVE"));
}

#[test]
fn clinical_visits_bracket_contacts_with_two_hygiene_checks() {
    let mut sim = Simulator::new(base_scenario()).unwrap();
    sim.run().unwrap();

    let moves = sim
        .event_log()
        .events_for_agent("NURSE_0")
        .iter()
        .filter(|e| e.event_type() == "MOVE")
        .count();
    let hygiene = sim
        .event_log()
        .events_for_agent("NURSE_0")
        .iter()
        .filter(|e| e.event_type() == "HYGIENE")
        .count();
    assert!(moves > 0);
    assert_eq!(hygiene, moves * 2, "each nurse visit has WASH_IN and WASH_OUT");
}
