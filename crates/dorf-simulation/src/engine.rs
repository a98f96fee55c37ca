use std::collections::VecDeque;

use dorf_core::WorldState;
use tracing::debug;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::{Provisions, SimContext};
use crate::error::{SimError, SimResult};
use crate::event::DayLog;
use crate::lifecycle::LifecycleSystem;
use crate::provisions::ProvisionSystem;
use crate::system::System;

/// The result of advancing a world copy by some number of days.
#[derive(Debug, Clone)]
pub struct Advance {
    /// The world after the last simulated day.
    pub world: WorldState,
    /// Logs for the simulated days, oldest first, capped at the journal size.
    pub logs: VecDeque<DayLog>,
}

/// Runs day cycles over a world.
///
/// The engine never touches a caller's world in place: [`Engine::advance`]
/// works on a copy and hands back the result, so a failed day leaves the
/// original exactly as it was.
#[derive(Debug)]
pub struct Engine {
    config: SimConfig,
    systems: Vec<Box<dyn System>>,
}

impl Engine {
    /// Create an engine with the standard systems: provisions, then lifecycle.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self::bare(config);
        engine.add_system(ProvisionSystem::new());
        engine.add_system(LifecycleSystem::new());
        engine
    }

    /// Create an engine with no systems registered.
    pub fn bare(config: SimConfig) -> Self {
        Self {
            config,
            systems: Vec::new(),
        }
    }

    /// Register a system. Systems run in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Names of the registered systems, in run order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulate one day on `world` in place and return its log.
    ///
    /// On error `world` may be partially updated; callers that need
    /// atomicity go through [`Engine::advance`].
    pub fn run_day(&self, world: &mut WorldState) -> SimResult<DayLog> {
        let mut clock = SimClock::new(world.day, self.config.harvest_interval);
        let day = clock.advance()?;
        let mut log = DayLog::new(day, world.food_stock);

        let mut ctx = SimContext {
            world,
            clock: &clock,
            config: &self.config,
            provisions: Provisions::default(),
            log: &mut log,
        };
        for system in &self.systems {
            system.tick(&mut ctx)?;
        }

        world.day = day;
        world.validate().map_err(SimError::Invariant)?;
        log.food_stock_after = world.food_stock;
        debug!(
            day,
            food_stock = world.food_stock,
            alive = world.alive_count(),
            "day simulated"
        );
        Ok(log)
    }

    /// Simulate `days` consecutive days on a copy of `world`.
    ///
    /// Running `advance(w, n)` is identical to running `advance(w, 1)` `n`
    /// times and chaining the results.
    pub fn advance(&self, world: &WorldState, days: u32) -> SimResult<Advance> {
        world.validate().map_err(SimError::Invariant)?;
        let mut next = world.clone();
        let mut logs = VecDeque::new();
        for _ in 0..days {
            logs.push_back(self.run_day(&mut next)?);
            if logs.len() > self.config.max_day_logs {
                logs.pop_front();
            }
        }
        Ok(Advance { world: next, logs })
    }
}
