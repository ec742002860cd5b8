//! Time management: the discrete-event clock driving all processes.

pub mod clock;

pub use clock::{EventClock, WakeEntry};
