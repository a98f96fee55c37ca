use crate::npc::NpcId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or checking a world state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An NPC with the same ID is already part of the world.
    #[error("duplicate npc id: {0}")]
    DuplicateId(NpcId),

    /// A living NPC has health at or below the floor, where it should have died.
    #[error("{0} is alive with health at its floor")]
    AliveAtHealthFloor(NpcId),

    /// A vital value lies outside its allowed range.
    #[error("{field} of {npc} is {value}, expected {min}..={max}")]
    OutOfRange {
        /// The NPC carrying the bad value.
        npc: NpcId,
        /// Which vital is out of range.
        field: &'static str,
        /// The offending value.
        value: i32,
        /// Lower bound of the range.
        min: i32,
        /// Upper bound of the range.
        max: i32,
    },

    /// The shared food stock dropped below zero.
    #[error("food stock is negative: {0}")]
    NegativeStock(i64),
}
