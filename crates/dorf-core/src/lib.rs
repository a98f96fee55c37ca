//! Core types for Dorfleben: villagers and the world state they live in.
//!
//! This crate only defines the data model and its invariants. The rules
//! that advance it live in `dorf-simulation`.

/// Error types used throughout the crate.
pub mod error;
/// NPC records, identifiers, jobs, and vital ranges.
pub mod npc;
/// The world state: day counter, food stock, and population.
pub mod world;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export NPC types.
pub use npc::{HEALTH, HUNGER, Job, MOOD, Npc, NpcId, VitalRange};
/// Re-export the world state.
pub use world::WorldState;
