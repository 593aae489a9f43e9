//! MKRAND core: a deterministic/non-deterministic random-bit generator
//! built as a small virtual cell processor.
//!
//! Registers are 128-cell ternary vectors; the central primitive evolves
//! a one-dimensional Rule-30 cellular automaton and samples its center
//! column for 128 generations per block. Entropy comes from wall-clock
//! time plus a per-processor cyclic counter (free-running mode), or from
//! a caller-supplied fingerprint (deterministic mode). This is not a
//! cryptographically vetted CSPRNG.

/// Ternary cell value domain.
pub mod cell;
pub use cell::Cell;

/// Fixed 128-cell register vectors and byte packing.
pub mod vector;
pub use vector::{Vector, CENTER_POSITION, VECTOR_BYTES, VECTOR_CELLS};

/// Bounded LIFO snapshot storage for register vectors.
pub mod frame;
pub use frame::{Frame, FRAME_CAPACITY};

/// Fault taxonomy for unrecoverable invariant violations.
pub mod fault;
pub use fault::Fault;

/// Register identifiers and the explicit run-state machine.
pub mod state;
pub use state::{Register, RunState, REGISTER_COUNT};

/// Time-seed sampling and the wall-clock seam.
pub mod clock;
pub use clock::{FixedClock, TimeSeed, TimeSource, WallClock, WallTime};

/// Rule-30 transition and row evolution.
pub mod rule30;
pub use rule30::{evolve, rule_30};

/// The cell processor: register file, state machine, instruction set.
pub mod processor;
pub use processor::Processor;

/// Boundary codec: PSI text and auxiliary renderings.
pub mod format;
pub use format::{format_vector, parse_psi, PsiParseError, VectorFormat, PSI_TEXT_LEN};

/// Host-facing block-generation entry points.
pub mod api;
pub use api::BlockError;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
