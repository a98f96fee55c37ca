use crate::context::SimContext;
use crate::error::SimResult;

/// A simulation subsystem that runs once per simulated day.
///
/// Systems are executed in registration order against the same
/// [`SimContext`]. They hold only configuration, so an engine can run on
/// a snapshot from any thread while the live world keeps serving reads.
pub trait System: std::fmt::Debug + Send + Sync {
    /// Human-readable name for this system.
    fn name(&self) -> &str;

    /// Called once per simulated day.
    fn tick(&self, ctx: &mut SimContext<'_>) -> SimResult<()>;
}
