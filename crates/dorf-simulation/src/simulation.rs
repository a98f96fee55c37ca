use dorf_core::WorldState;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::engine::{Advance, Engine};
use crate::error::{SimError, SimResult};
use crate::event::{DayLog, Journal};
use crate::setup::starting_world;

/// What a tick reports back to the caller.
///
/// `ok` is false only for an internal fault, in which case `day` and
/// `food_stock` describe the unchanged prior state and `error` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Whether the tick was applied.
    pub ok: bool,
    /// The current day after the tick.
    pub day: u64,
    /// The current food stock after the tick.
    pub food_stock: i64,
    /// Diagnostic for a failed tick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TickSummary {
    /// Summary of a successfully applied tick.
    pub fn applied(world: &WorldState) -> Self {
        Self {
            ok: true,
            day: world.day,
            food_stock: world.food_stock,
            error: None,
        }
    }

    /// Summary of a tick that was rolled back.
    pub fn failed(world: &WorldState, error: &SimError) -> Self {
        Self {
            ok: false,
            day: world.day,
            food_stock: world.food_stock,
            error: Some(error.to_string()),
        }
    }
}

/// A saved simulation: the live world plus its journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    /// The world at save time.
    pub world: WorldState,
    /// Journal entries, oldest first.
    #[serde(default)]
    pub logs: Vec<DayLog>,
}

/// Check a caller-supplied multiplier and convert it to a day count.
pub fn validate_multiplier(multiplier: i64) -> SimResult<u32> {
    match u32::try_from(multiplier) {
        Ok(days) if days >= 1 => Ok(days),
        _ => Err(SimError::InvalidMultiplier(multiplier)),
    }
}

/// A tick computed against one revision of the live world.
#[derive(Debug)]
pub(crate) struct Plan {
    revision: u64,
    advance: Advance,
}

/// Owns one village: the engine, the live world, the day-0 world, and the journal.
///
/// Mutation only happens through [`Simulation::tick`] and
/// [`Simulation::reset`]. Each is applied as a whole or not at all. Every
/// change to the live world bumps its revision, so a tick planned against
/// an older revision can never be committed over a newer world.
#[derive(Debug)]
pub struct Simulation {
    engine: Engine,
    initial: WorldState,
    world: WorldState,
    revision: u64,
    journal: Journal,
}

impl Simulation {
    /// Create a simulation at its day-0 state.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let initial = starting_world(&config)?;
        let journal = Journal::new(config.max_day_logs);
        Ok(Self {
            engine: Engine::new(config),
            world: initial.clone(),
            initial,
            revision: 0,
            journal,
        })
    }

    /// Resume a simulation from a saved world and journal.
    ///
    /// The day-0 world is still rebuilt from `config`, so `reset` returns to
    /// the configured start rather than to the save.
    pub fn restore(config: SimConfig, save: SaveFile) -> SimResult<Self> {
        save.world.validate()?;
        let mut sim = Self::new(config)?;
        sim.world = save.world;
        sim.journal.extend(save.logs);
        Ok(sim)
    }

    /// Snapshot the live world and journal for saving.
    pub fn save(&self) -> SaveFile {
        SaveFile {
            world: self.world.clone(),
            logs: self.journal.iter().cloned().collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Advance the world by `multiplier` days.
    ///
    /// A multiplier outside `1..=u32::MAX` is rejected before anything
    /// changes. An internal fault rolls the whole tick back and is reported
    /// through an `ok: false` summary rather than an error.
    pub fn tick(&mut self, multiplier: i64) -> SimResult<TickSummary> {
        let days = validate_multiplier(multiplier)?;
        match self.plan(days).and_then(|plan| self.commit(plan)) {
            Ok(()) => Ok(TickSummary::applied(&self.world)),
            Err(e) => settle_failure(&self.world, e),
        }
    }

    /// A full copy of the live world.
    pub fn state(&self) -> WorldState {
        self.world.clone()
    }

    /// Discard the live world and journal and return to day 0.
    pub fn reset(&mut self) {
        self.world = self.initial.clone();
        self.revision = self.revision.wrapping_add(1);
        self.journal.clear();
        info!("simulation reset to day 0");
    }

    /// The newest `limit` day logs in chronological order.
    pub fn logs(&self, limit: i64) -> Vec<DayLog> {
        self.journal.recent(limit)
    }

    // -----------------------------------------------------------------------
    // Two-phase tick
    // -----------------------------------------------------------------------

    /// Compute the result of `days` days without applying it.
    pub(crate) fn plan(&self, days: u32) -> SimResult<Plan> {
        let advance = self.engine.advance(&self.world, days)?;
        Ok(Plan {
            revision: self.revision,
            advance,
        })
    }

    /// Apply a plan, provided the live world has not changed since it was made.
    pub(crate) fn commit(&mut self, plan: Plan) -> SimResult<()> {
        if plan.revision != self.revision {
            return Err(SimError::StalePlan {
                planned: plan.revision,
                current: self.revision,
            });
        }
        let from = self.world.day;
        self.world = plan.advance.world;
        self.revision = self.revision.wrapping_add(1);
        self.journal.extend(plan.advance.logs);
        info!(
            from,
            to = self.world.day,
            food_stock = self.world.food_stock,
            "tick committed"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The live world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable access to the live world, for scenario setup.
    pub fn world_mut(&mut self) -> &mut WorldState {
        self.revision = self.revision.wrapping_add(1);
        &mut self.world
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        self.engine.config()
    }

    /// The day journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}

/// Turn a failed plan into the right outcome: internal faults become an
/// `ok: false` summary, everything else stays an error.
pub(crate) fn settle_failure(world: &WorldState, error: SimError) -> SimResult<TickSummary> {
    if error.is_internal() {
        warn!(day = world.day, %error, "tick rolled back");
        Ok(TickSummary::failed(world, &error))
    } else {
        Err(error)
    }
}
