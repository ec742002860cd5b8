//! Domain models for the ward simulator.

pub mod event;
pub mod patient;
pub mod room;
pub mod staff;
pub mod state;

// Re-exports
pub use event::{Event, EventLog, EventRecord, HygieneMoment, MECHANISM_DIRECT_HANDS};
pub use patient::{Patient, PatientState};
pub use room::{Room, RoomType};
pub use staff::{Staff, StaffRole};
pub use state::WardState;
