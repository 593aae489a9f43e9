use crate::fault::Fault;

/// Explicit execution-state machine for the cell processor.
///
/// `Uninitialized -> Idle <-> Running`, with `Halted` terminal. `Idle` is
/// the only state the extraction loop may start from; it self-transitions
/// to `Running` for the 128-generation loop and back on completion. There
/// are no suspension points: a tick either completes or the fault that
/// stopped it is latched here and every later operation refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Allocated but never reset.
    #[default]
    Uninitialized,
    /// Ready for the next operation.
    Idle,
    /// Inside the 128-generation extraction loop.
    Running,
    /// Fault latched; no further progress without a fresh processor.
    Halted(Fault),
}

impl RunState {
    /// Returns the latched fault, if this state is halted.
    #[must_use]
    pub const fn latched_fault(self) -> Option<Fault> {
        match self {
            Self::Halted(fault) => Some(fault),
            Self::Uninitialized | Self::Idle | Self::Running => None,
        }
    }

    /// Returns `true` when operations may be accepted.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::RunState;
    use crate::fault::Fault;

    #[test]
    fn default_state_is_uninitialized() {
        assert_eq!(RunState::default(), RunState::Uninitialized);
    }

    #[test]
    fn latched_fault_reports_only_the_halted_variant() {
        assert_eq!(RunState::Uninitialized.latched_fault(), None);
        assert_eq!(RunState::Idle.latched_fault(), None);
        assert_eq!(RunState::Running.latched_fault(), None);
        assert_eq!(
            RunState::Halted(Fault::StackOverflow).latched_fault(),
            Some(Fault::StackOverflow)
        );
    }

    #[test]
    fn only_idle_accepts_operations() {
        assert!(RunState::Idle.is_idle());
        assert!(!RunState::Running.is_idle());
        assert!(!RunState::Uninitialized.is_idle());
        assert!(!RunState::Halted(Fault::ClockStuck).is_idle());
    }
}
