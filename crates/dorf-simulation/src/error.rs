use dorf_core::CoreError;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while configuring or advancing a simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The tick multiplier was zero, negative, or too large.
    #[error("invalid multiplier {0}: expected a positive integer up to {max}", max = u32::MAX)]
    InvalidMultiplier(i64),

    /// A counter or the food stock would overflow.
    #[error("arithmetic overflow while updating {0}")]
    Overflow(&'static str),

    /// The world broke one of its invariants during a tick.
    #[error("invariant violated: {0}")]
    Invariant(CoreError),

    /// A planned tick was computed from a world that has since changed.
    #[error("stale tick plan: planned at revision {planned}, world is at revision {current}")]
    StalePlan {
        /// Revision the plan was computed from.
        planned: u64,
        /// Revision of the live world.
        current: u64,
    },

    /// Another tick is still running on this simulation.
    #[error("a tick is already in progress")]
    Busy,

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A core model error outside of a tick.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SimError {
    /// Whether this error is an internal computation fault rather than bad input.
    ///
    /// Internal faults are reported as a failed tick summary instead of an error.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Overflow(_) | Self::Invariant(_) | Self::StalePlan { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy() {
        assert!(SimError::Overflow("day").is_internal());
        assert!(SimError::Invariant(CoreError::NegativeStock(-1)).is_internal());
        assert!(SimError::StalePlan { planned: 1, current: 2 }.is_internal());
        assert!(!SimError::InvalidMultiplier(0).is_internal());
        assert!(!SimError::Busy.is_internal());
    }

    #[test]
    fn multiplier_message() {
        let msg = SimError::InvalidMultiplier(-1).to_string();
        assert!(msg.starts_with("invalid multiplier -1"));
    }
}
