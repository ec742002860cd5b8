//! PyO3 boundary for the Python backend.

pub mod simulator;

pub use simulator::PySimulator;
