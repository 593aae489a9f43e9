//! Rule-30 elementary cellular-automaton transition.

use crate::cell::Cell;
use crate::vector::{Vector, VECTOR_CELLS};

/// Rule 30 local update: `next = left XOR (middle OR right)`.
///
/// Propagates `Null` like every cell primitive; the extraction loop
/// guarantees defined inputs by checking the seed register first.
#[must_use]
pub const fn rule_30(left: Cell, middle: Cell, right: Cell) -> Cell {
    left.xor(middle.or(right))
}

/// Computes one full generation from `src` into `dst` with circular
/// neighbor wraparound (position 1 borders position 128).
///
/// The whole next row is derived from the frozen previous row; `src` and
/// `dst` are distinct vectors, so there is no read-after-write within a
/// generation.
pub fn evolve(src: &Vector, dst: &mut Vector) {
    let cells = src.cells();
    let out = dst.cells_mut();
    let n = usize::from(VECTOR_CELLS);
    for i in 0..n {
        let left = cells[(i + 1) % n];
        let right = cells[(i + n - 1) % n];
        out[i] = rule_30(left, cells[i], right);
    }
}
