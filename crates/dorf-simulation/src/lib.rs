//! Tick-based village simulation for Dorfleben.
//!
//! An [`Engine`] runs registered [`System`]s over a private copy of a
//! [`dorf_core::WorldState`], one day at a time. [`Simulation`] owns the
//! live world and commits each tick as a whole, and [`SharedSimulation`]
//! makes that safe to drive from several threads. The [`protocol`] module
//! exposes the same commands as line-delimited JSON.

/// Day counter and harvest calendar.
pub mod clock;
/// Rules, job table, and starting population.
pub mod config;
/// Mutable context passed to systems each day.
pub mod context;
/// Day-cycle engine.
pub mod engine;
/// Error types for the simulation crate.
pub mod error;
/// Simulation events, day logs, and the bounded journal.
pub mod event;
/// Lifecycle system: hunger, health, mood, and death.
pub mod lifecycle;
/// Line-delimited JSON command protocol.
pub mod protocol;
/// Provisions system: rations and harvest.
pub mod provisions;
/// Deterministic starting world.
pub mod setup;
/// Thread-safe simulation handle.
pub mod shared;
/// The owned simulation and its commands.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;

/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-exports of the configuration types.
pub use config::{JobProfile, JobTable, Resident, SimConfig, VitalsConfig};
/// Re-exports of [`context::SimContext`] and [`context::Provisions`].
pub use context::{Provisions, SimContext};
/// Re-exports of [`engine::Engine`] and [`engine::Advance`].
pub use engine::{Advance, Engine};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of the event and journal types.
pub use event::{DayLog, Journal, NpcChange, SimEvent, SimEventKind};
/// Re-exports of the standard systems.
pub use lifecycle::LifecycleSystem;
/// Re-export of [`provisions::ProvisionSystem`].
pub use provisions::ProvisionSystem;
/// Re-export of [`setup::starting_world`].
pub use setup::starting_world;
/// Re-export of [`shared::SharedSimulation`].
pub use shared::SharedSimulation;
/// Re-exports of [`simulation::Simulation`] and its companions.
pub use simulation::{SaveFile, Simulation, TickSummary, validate_multiplier};
/// Re-export of [`system::System`].
pub use system::System;
