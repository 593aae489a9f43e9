use thiserror::Error;

use crate::state::Register;

/// Unrecoverable invariant violations inside the cell processor.
///
/// Any of these represents corrupted or protocol-violating internal state
/// rather than a user-input problem. The processor latches the first fault
/// into [`RunState::Halted`](crate::RunState::Halted) and refuses all
/// further operations: continuing past a detected violation would risk
/// output that looks valid but is not the automaton's true next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// Cell position access outside the 1..=128 register range.
    #[error("cell position {pos} outside 1..=128")]
    PositionOutOfRange {
        /// Offending 1-based position.
        pos: u8,
    },
    /// Byte index outside the 1..=16 packing range.
    #[error("byte index {byte} outside 1..=16")]
    ByteOutOfRange {
        /// Offending 1-based byte index.
        byte: u8,
    },
    /// A register held a `Null` cell where a live value was required.
    #[error("null cell in register {register} where a live value is required")]
    NullOperand {
        /// Register that failed the liveness check.
        register: Register,
    },
    /// An operation requiring the idle state ran while the machine was busy
    /// or never initialized.
    #[error("{op} requires an idle processor")]
    NotIdle {
        /// Operation that violated the state protocol.
        op: &'static str,
    },
    /// Push attempted past the fixed frame capacity.
    #[error("frame stack overflow")]
    StackOverflow,
    /// Two consecutive time samples were bit-identical.
    #[error("time source is stuck")]
    ClockStuck,
}
