//! Processor state model: register identifiers and the run-state machine.

mod registers;
mod run_state;

pub use registers::{Register, REGISTER_COUNT};
pub use run_state::RunState;
