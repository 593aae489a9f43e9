//! Bounded LIFO storage for register-vector snapshots.

use crate::fault::Fault;
use crate::vector::Vector;

/// Fixed slot capacity of a frame stack.
pub const FRAME_CAPACITY: usize = 128;

/// Ownership-transferring LIFO of register vectors.
///
/// Push is a *move*: the source register reads all-`Null` afterwards. Pop
/// moves the top slot out into the destination and nulls the slot. Pop on
/// an empty stack is a no-op; push past capacity is a checked
/// [`Fault::StackOverflow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: Box<[Vector]>,
    count: usize,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Creates an empty frame with all slots null-set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![Vector::new(); FRAME_CAPACITY].into_boxed_slice(),
            count: 0,
        }
    }

    /// Number of occupied slots. Always `0..=capacity`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` when no slots are occupied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` when every slot is occupied.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.count == FRAME_CAPACITY
    }

    /// Moves `src` into the next free slot, nulling the source, and
    /// returns the new occupancy count.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::StackOverflow`] when the stack is full; the source
    /// register is left untouched on this path.
    pub fn push(&mut self, src: &mut Vector) -> Result<usize, Fault> {
        if self.is_full() {
            return Err(Fault::StackOverflow);
        }
        self.rows[self.count].take_from(src);
        self.count += 1;
        Ok(self.count)
    }

    /// Moves the top slot into `dst`, nulling the slot. No-op when empty.
    pub fn pop(&mut self, dst: &mut Vector) {
        if self.count == 0 {
            return;
        }
        self.count -= 1;
        dst.take_from(&mut self.rows[self.count]);
    }

    /// Nullifies every slot and resets the count.
    pub fn clear(&mut self) {
        for row in &mut *self.rows {
            row.set_null();
        }
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FRAME_CAPACITY};
    use crate::vector::Vector;

    #[test]
    fn push_then_pop_is_lifo_and_bit_identical() {
        let mut frame = Frame::new();
        let v1 = Vector::from_bytes(&[0x11; 16]);
        let v2 = Vector::from_bytes(&[0x22; 16]);

        let mut src = v1.clone();
        assert_eq!(frame.push(&mut src).expect("capacity available"), 1);
        assert_eq!(src, Vector::new());

        let mut src = v2.clone();
        assert_eq!(frame.push(&mut src).expect("capacity available"), 2);
        assert_eq!(src, Vector::new());

        let mut out = Vector::new();
        frame.pop(&mut out);
        assert_eq!(out, v2);
        frame.pop(&mut out);
        assert_eq!(out, v1);
        assert!(frame.is_empty());
    }

    #[test]
    fn pop_on_empty_is_a_noop() {
        let mut frame = Frame::new();
        let mut dst = Vector::from_bytes(&[0x33; 16]);
        let before = dst.clone();
        frame.pop(&mut dst);
        assert_eq!(dst, before);
    }

    #[test]
    fn push_past_capacity_faults_and_preserves_the_source() {
        let mut frame = Frame::new();
        for _ in 0..FRAME_CAPACITY {
            let mut v = Vector::zeroed();
            frame.push(&mut v).expect("capacity available");
        }
        assert!(frame.is_full());

        let mut extra = Vector::from_bytes(&[0x44; 16]);
        let err = frame.push(&mut extra).expect_err("stack is full");
        assert_eq!(err, crate::fault::Fault::StackOverflow);
        assert_eq!(extra.to_bytes(), [0x44; 16]);
        assert_eq!(frame.len(), FRAME_CAPACITY);
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut frame = Frame::new();
        let mut v = Vector::zeroed();
        frame.push(&mut v).expect("capacity available");
        frame.clear();
        assert!(frame.is_empty());

        let mut dst = Vector::zeroed();
        frame.pop(&mut dst);
        assert!(dst.is_zero());
    }
}
