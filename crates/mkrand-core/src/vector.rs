//! Fixed 128-cell register vectors and their byte-packing law.

use crate::cell::Cell;
use crate::fault::Fault;

/// Number of cells in every register vector.
pub const VECTOR_CELLS: u8 = 128;

/// Number of packed bytes in a register vector.
pub const VECTOR_BYTES: u8 = 16;

/// Center position sampled by the extraction algorithm (and seeded into an
/// all-`False` row to escape the Rule-30 fixed point).
pub const CENTER_POSITION: u8 = VECTOR_CELLS / 2;

/// A processor register: exactly 128 ternary cells addressed by 1-based
/// position `1..=128`.
///
/// There is no variable-length form. Storage layout is internal; the
/// observable surface is position-addressed access plus the whole-vector
/// operations below. The *move* operations model the machine's destructive
/// read discipline: the source is re-initialized to all-`Null` afterwards,
/// so later reads of a moved-from register observe `Null` cells rather
/// than a stale value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    cells: [Cell; VECTOR_CELLS as usize],
}

impl Default for Vector {
    fn default() -> Self {
        Self::new()
    }
}

impl Vector {
    /// Creates an all-`Null` vector (the "not yet produced" marker).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Null; VECTOR_CELLS as usize],
        }
    }

    /// Creates an all-`False` vector.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            cells: [Cell::False; VECTOR_CELLS as usize],
        }
    }

    /// Builds a vector from 16 packed bytes: byte `n` fills positions
    /// `(n-1)*8+1 ..= (n-1)*8+8`, least-significant bit first.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; VECTOR_BYTES as usize]) -> Self {
        let mut v = Self::new();
        for (chunk, byte) in v.cells.chunks_exact_mut(8).zip(bytes) {
            for (bit, cell) in chunk.iter_mut().enumerate() {
                *cell = Cell::from_bit((byte >> bit) & 0x01 == 1);
            }
        }
        v
    }

    /// Reads the cell at 1-based `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::PositionOutOfRange`] when `pos` is 0 or above 128.
    pub fn get(&self, pos: u8) -> Result<Cell, Fault> {
        if !(1..=VECTOR_CELLS).contains(&pos) {
            return Err(Fault::PositionOutOfRange { pos });
        }
        Ok(self.cells[usize::from(pos - 1)])
    }

    /// Writes the cell at 1-based `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::PositionOutOfRange`] when `pos` is 0 or above 128.
    pub fn set(&mut self, pos: u8, cell: Cell) -> Result<(), Fault> {
        if !(1..=VECTOR_CELLS).contains(&pos) {
            return Err(Fault::PositionOutOfRange { pos });
        }
        self.cells[usize::from(pos - 1)] = cell;
        Ok(())
    }

    /// Sets every cell to the given value.
    pub fn fill(&mut self, cell: Cell) {
        self.cells = [cell; VECTOR_CELLS as usize];
    }

    /// Sets every cell to `Null` (null-set).
    pub fn set_null(&mut self) {
        self.fill(Cell::Null);
    }

    /// Sets every cell to `False` (zero-set).
    pub fn set_zero(&mut self) {
        self.fill(Cell::False);
    }

    /// Copies `src` into `self`, leaving the source intact.
    pub fn copy_from(&mut self, src: &Self) {
        self.cells = src.cells;
    }

    /// Moves `src` into `self`: the source is reset to all-`Null`
    /// (destructive read).
    pub fn take_from(&mut self, src: &mut Self) {
        self.cells = src.cells;
        src.set_null();
    }

    /// Moves this vector out, leaving all-`Null` behind.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let out = self.clone();
        self.set_null();
        out
    }

    /// Returns `true` when any cell is `Null` (the machine's `CMPN`).
    #[must_use]
    pub fn has_null(&self) -> bool {
        self.cells.contains(&Cell::Null)
    }

    /// Returns `true` when every cell is `False` (the machine's `CMPZ`).
    /// A `Null` anywhere makes this `false`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::False)
    }

    /// Cell-wise ternary XOR. `Null` operand cells propagate; callers that
    /// require live operands check [`Self::has_null`] first and fault.
    #[must_use]
    pub fn xor(&self, rhs: &Self) -> Self {
        let mut out = Self::new();
        for (slot, (l, r)) in out
            .cells
            .iter_mut()
            .zip(self.cells.iter().zip(rhs.cells.iter()))
        {
            *slot = l.xor(*r);
        }
        out
    }

    /// Extracts packed byte `n` (1..=16). Positions `(n-1)*8+1 ..=
    /// (n-1)*8+8` contribute, lowest position as least-significant bit;
    /// `Null` cells contribute 0.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ByteOutOfRange`] when `n` is 0 or above 16.
    pub fn byte(&self, n: u8) -> Result<u8, Fault> {
        if !(1..=VECTOR_BYTES).contains(&n) {
            return Err(Fault::ByteOutOfRange { byte: n });
        }
        let start = usize::from(n - 1) * 8;
        let mut r = 0_u8;
        for (bit, cell) in self.cells[start..start + 8].iter().enumerate() {
            if *cell == Cell::True {
                r |= 1 << bit;
            }
        }
        Ok(r)
    }

    /// Overwrites packed byte `n` (1..=16) from a binary byte value.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ByteOutOfRange`] when `n` is 0 or above 16.
    pub fn set_byte(&mut self, n: u8, value: u8) -> Result<(), Fault> {
        if !(1..=VECTOR_BYTES).contains(&n) {
            return Err(Fault::ByteOutOfRange { byte: n });
        }
        let start = usize::from(n - 1) * 8;
        for (bit, cell) in self.cells[start..start + 8].iter_mut().enumerate() {
            *cell = Cell::from_bit((value >> bit) & 0x01 == 1);
        }
        Ok(())
    }

    /// Packs the whole vector into 16 bytes under the byte-packing law.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; VECTOR_BYTES as usize] {
        let mut bytes = [0_u8; VECTOR_BYTES as usize];
        for (slot, chunk) in bytes.iter_mut().zip(self.cells.chunks_exact(8)) {
            for (bit, cell) in chunk.iter().enumerate() {
                if *cell == Cell::True {
                    *slot |= 1 << bit;
                }
            }
        }
        bytes
    }

    /// Number of `True` cells.
    #[must_use]
    pub fn hamming_weight(&self) -> u32 {
        let count = self.cells.iter().filter(|c| **c == Cell::True).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Raw cell storage, position 1 first.
    pub(crate) const fn cells(&self) -> &[Cell; VECTOR_CELLS as usize] {
        &self.cells
    }

    /// Mutable raw cell storage, position 1 first.
    pub(crate) const fn cells_mut(&mut self) -> &mut [Cell; VECTOR_CELLS as usize] {
        &mut self.cells
    }
}
