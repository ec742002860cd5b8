//! Ward State
//!
//! Holds every entity of a running simulation: rooms, patients, staff.
//! Entity sets are fixed after the world build — nothing is created or
//! destroyed mid-run, only loads and patient states mutate.
//!
//! # Iteration order is load-bearing
//!
//! Entities live in `Vec`s (creation order) with id-to-index maps on the
//! side. Every lookup that feeds a random choice or a "first match" rule
//! walks the vectors, never a `HashMap` — hash iteration order varies
//! between processes and would break deterministic replay.

use std::collections::HashMap;

use crate::models::patient::Patient;
use crate::models::room::Room;
use crate::models::staff::Staff;

/// Complete mutable state of the ward.
#[derive(Debug, Clone, Default)]
pub struct WardState {
    rooms: Vec<Room>,
    room_index: HashMap<String, usize>,
    patients: Vec<Patient>,
    patient_index: HashMap<String, usize>,
    staff: Vec<Staff>,
}

impl WardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from checkpointed entity lists.
    pub fn from_parts(rooms: Vec<Room>, patients: Vec<Patient>, staff: Vec<Staff>) -> Self {
        let room_index = rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let patient_index = patients
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            rooms,
            room_index,
            patients,
            patient_index,
            staff,
        }
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    pub fn add_room(&mut self, room: Room) {
        debug_assert!(!self.room_index.contains_key(&room.id));
        self.room_index.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
    }

    pub fn has_room(&self, id: &str) -> bool {
        self.room_index.contains_key(id)
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        let i = *self.room_index.get(id)?;
        self.rooms.get_mut(i)
    }

    /// Rooms in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    // ========================================================================
    // Patients
    // ========================================================================

    pub fn add_patient(&mut self, patient: Patient) {
        debug_assert!(!self.patient_index.contains_key(&patient.id));
        self.patient_index
            .insert(patient.id.clone(), self.patients.len());
        self.patients.push(patient);
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patient_index.get(id).map(|&i| &self.patients[i])
    }

    pub fn patient_mut(&mut self, id: &str) -> Option<&mut Patient> {
        let i = *self.patient_index.get(id)?;
        self.patients.get_mut(i)
    }

    /// Patients in creation order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    /// First patient (in creation order) occupying the given room.
    ///
    /// The contact model assumes at most one patient per room; with
    /// multiple occupants only the first configured one is ever contacted.
    pub fn first_patient_in_room(&self, room_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.room_id == room_id)
    }

    // ========================================================================
    // Staff
    // ========================================================================

    pub fn add_staff(&mut self, staff: Staff) {
        self.staff.push(staff);
    }

    /// Staff in creation order (staffing-list order, then instance index).
    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn staff_mut(&mut self) -> &mut [Staff] {
        &mut self.staff
    }

    pub fn num_staff(&self) -> usize {
        self.staff.len()
    }

    /// Mutable access to the three parties of one clinical contact.
    ///
    /// Borrows staff, room and (optionally) patient simultaneously; they
    /// live in separate vectors so the borrows are disjoint.
    pub fn contact_entities_mut(
        &mut self,
        staff_index: usize,
        room_id: &str,
        patient_id: Option<&str>,
    ) -> Option<(&mut Staff, &mut Room, Option<&mut Patient>)> {
        let room_i = *self.room_index.get(room_id)?;
        let patient_i = match patient_id {
            Some(id) => Some(*self.patient_index.get(id)?),
            None => None,
        };
        let staff = self.staff.get_mut(staff_index)?;
        let room = self.rooms.get_mut(room_i)?;
        let patient = match patient_i {
            Some(i) => Some(self.patients.get_mut(i)?),
            None => None,
        };
        Some((staff, room, patient))
    }
}
