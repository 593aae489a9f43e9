/// A ternary logic cell.
///
/// `Null` marks a cell that was never produced by the machine. Logic
/// primitives propagate `Null` unconditionally, so a single uninitialized
/// cell contaminates every value computed from it; the processor checks
/// for `Null` operands explicitly before mixing operations and faults
/// rather than emitting garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Cell {
    /// Defined zero bit.
    False,
    /// Defined one bit.
    True,
    /// Uninitialized / consumed.
    #[default]
    Null,
}

impl Cell {
    /// Ternary AND: `Null` if either operand is `Null`, else two-valued AND.
    #[must_use]
    pub const fn and(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Null, _) | (_, Self::Null) => Self::Null,
            (Self::True, Self::True) => Self::True,
            _ => Self::False,
        }
    }

    /// Ternary OR: `Null` if either operand is `Null`, else two-valued OR.
    #[must_use]
    pub const fn or(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Null, _) | (_, Self::Null) => Self::Null,
            (Self::False, Self::False) => Self::False,
            _ => Self::True,
        }
    }

    /// Ternary XOR: `Null` if either operand is `Null`, else two-valued XOR.
    #[must_use]
    pub const fn xor(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Null, _) | (_, Self::Null) => Self::Null,
            (Self::True, Self::False) | (Self::False, Self::True) => Self::True,
            _ => Self::False,
        }
    }

    /// Maps a binary bit to a defined cell.
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::True
        } else {
            Self::False
        }
    }

    /// Returns the binary value of a defined cell, or `None` for `Null`.
    #[must_use]
    pub const fn to_bit(self) -> Option<bool> {
        match self {
            Self::False => Some(false),
            Self::True => Some(true),
            Self::Null => None,
        }
    }

    /// Single-character rendering used by the text-binary format.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::False => '0',
            Self::True => '1',
            Self::Null => 'N',
        }
    }
}
