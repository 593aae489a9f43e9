//! Time-seed sampling and the wall-clock seam.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::vector::Vector;

/// One wall-clock reading: whole seconds plus a sub-second fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WallTime {
    /// Whole seconds of the reading.
    pub seconds: u32,
    /// Sub-second fraction, in microseconds.
    pub subseconds: u32,
}

/// Source of wall-clock readings consumed by the seed pipeline.
///
/// The processor owns one; injecting a fixed source makes every
/// time-dependent path deterministic under test.
pub trait TimeSource {
    /// Returns the current reading. Assumed to return promptly; this is
    /// the core's only environment dependency.
    fn now(&mut self) -> WallTime;
}

/// Default [`TimeSource`] backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&mut self) -> WallTime {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        WallTime {
            seconds: since_epoch.as_secs() as u32,
            subseconds: since_epoch.subsec_micros(),
        }
    }
}

/// Fixed [`TimeSource`] for deterministic tests: every reading is the
/// same configured value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(
    /// The reading returned on every sample.
    pub WallTime,
);

impl TimeSource for FixedClock {
    fn now(&mut self) -> WallTime {
        self.0
    }
}

/// Entropy catalyst sampled on every free-running tick: 96 bits of
/// environmental state in the form of external (passing) and internal
/// (cyclic) time.
///
/// `cyclic` is a per-processor counter incremented on every sample, so two
/// seeds taken in the same clock instant are still distinct. Seeds are
/// produced fresh and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TimeSeed {
    /// Wall-clock seconds.
    pub long_count: u32,
    /// Wall-clock sub-second fraction.
    pub short_count: u32,
    /// Per-processor sample counter.
    pub cyclic: u32,
}

impl TimeSeed {
    /// Spreads the seed over a register vector: `long_count` at positions
    /// 1..=32, `short_count` at 33..=64, `cyclic` at 65..=96
    /// (least-significant bit at the lowest position), remainder `False`.
    /// Every cell of the result is defined.
    #[must_use]
    pub fn to_vector(self) -> Vector {
        let mut bytes = [0_u8; 16];
        bytes[0..4].copy_from_slice(&self.long_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.short_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.cyclic.to_le_bytes());
        Vector::from_bytes(&bytes)
    }
}

impl fmt::Display for TimeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LC:{:08X} SC:{:08X} CY:{:08X}",
            self.long_count, self.short_count, self.cyclic
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedClock, TimeSeed, TimeSource, WallTime};

    #[test]
    fn seed_vector_layout_follows_the_packing_law() {
        let seed = TimeSeed {
            long_count: 0x0403_0201,
            short_count: 0x0807_0605,
            cyclic: 0x0C0B_0A09,
        };
        let v = seed.to_vector();
        assert!(!v.has_null());
        assert_eq!(
            v.to_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 0, 0, 0, 0]
        );
    }

    #[test]
    fn fixed_clock_repeats_its_reading() {
        let mut clock = FixedClock(WallTime {
            seconds: 7,
            subseconds: 11,
        });
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn display_matches_the_diagnostic_form() {
        let seed = TimeSeed {
            long_count: 0xDEAD_BEEF,
            short_count: 1,
            cyclic: 2,
        };
        assert_eq!(seed.to_string(), "LC:DEADBEEF SC:00000001 CY:00000002");
    }
}
