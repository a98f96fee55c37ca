use std::collections::HashSet;

use dorf_core::{NpcId, WorldState};

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::event::{DayLog, SimEvent, SimEventKind};

/// Outcome of the day's ration draw, shared with later systems.
#[derive(Debug, Clone, Default)]
pub struct Provisions {
    /// NPCs that drew a full ration.
    pub fed: HashSet<NpcId>,
    /// Rations owed but not covered by the stock.
    pub shortfall: i64,
}

impl Provisions {
    /// Whether `id` ate today.
    pub fn is_fed(&self, id: NpcId) -> bool {
        self.fed.contains(&id)
    }

    /// Whether the stock ran short today.
    pub fn is_famine(&self) -> bool {
        self.shortfall > 0
    }
}

/// Mutable context passed to each system during a day.
pub struct SimContext<'a> {
    /// The world being advanced. Always a private working copy.
    pub world: &'a mut WorldState,
    /// Clock positioned on the day being simulated.
    pub clock: &'a SimClock,
    /// Rules for this run.
    pub config: &'a SimConfig,
    /// Ration results, filled in by the provisions system.
    pub provisions: Provisions,
    /// The day's log.
    pub log: &'a mut DayLog,
}

impl SimContext<'_> {
    /// Record a simulation event on the current day.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.log
            .events
            .push(SimEvent::new(self.clock.day(), kind, description));
    }

    /// The day being simulated.
    pub fn day(&self) -> u64 {
        self.clock.day()
    }
}
