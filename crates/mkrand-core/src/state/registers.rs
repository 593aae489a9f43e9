use std::fmt;

/// Number of named vector registers in the cell processor.
pub const REGISTER_COUNT: usize = 9;

/// Named vector registers of the cell processor.
///
/// `A..D` are general purpose. `Psi` holds the fingerprint value, `R30`
/// the latest extraction output, `SdR30` the automaton continuation seed
/// (the only register that persists meaning across ticks), `SdTime` the
/// time-derived seed material, and `R` the externally visible result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Register {
    A,
    B,
    C,
    D,
    Psi,
    R30,
    SdR30,
    SdTime,
    R,
}

impl Register {
    /// Ordered list of all registers, reset/teardown order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::Psi,
        Self::R30,
        Self::SdR30,
        Self::SdTime,
        Self::R,
    ];

    /// Push order of the seed bundle (`push_seed`); pops reverse it.
    pub const SEED_BUNDLE: [Self; 2] = [Self::SdTime, Self::SdR30];

    /// Push order of the general-purpose bundle (`push_gp`); pops reverse it.
    pub const GP_BUNDLE: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Canonical register name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Psi => "PSI",
            Self::R30 => "R30",
            Self::SdR30 => "SDR30",
            Self::SdTime => "SDTIME",
            Self::R => "R",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Register, REGISTER_COUNT};

    #[test]
    fn register_list_is_complete_and_distinct() {
        assert_eq!(Register::ALL.len(), REGISTER_COUNT);
        for (i, a) in Register::ALL.iter().enumerate() {
            for b in &Register::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn names_match_the_machine_vocabulary() {
        assert_eq!(Register::Psi.to_string(), "PSI");
        assert_eq!(Register::SdR30.to_string(), "SDR30");
        assert_eq!(Register::SdTime.to_string(), "SDTIME");
    }

    #[test]
    fn bundles_use_the_documented_order() {
        assert_eq!(Register::SEED_BUNDLE, [Register::SdTime, Register::SdR30]);
        assert_eq!(
            Register::GP_BUNDLE,
            [Register::A, Register::B, Register::C, Register::D]
        );
    }
}
