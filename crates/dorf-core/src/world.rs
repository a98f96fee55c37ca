use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::npc::{Npc, NpcId};

/// The whole village at one point in time.
///
/// This is both the live store owned by the simulation and the snapshot
/// handed out to callers. `npcs` is always serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Number of simulated days so far. Starts at 0.
    pub day: u64,
    /// Shared food pool.
    pub food_stock: i64,
    /// Villagers in creation order.
    #[serde(default, deserialize_with = "lenient_npcs")]
    npcs: Vec<Npc>,
}

impl WorldState {
    /// Create an empty world at day 0.
    pub fn new(food_stock: i64) -> Self {
        Self {
            day: 0,
            food_stock,
            npcs: Vec::new(),
        }
    }

    /// Create a world from an existing population, rejecting duplicate IDs.
    pub fn with_npcs(day: u64, food_stock: i64, npcs: Vec<Npc>) -> CoreResult<Self> {
        let mut world = Self {
            day,
            food_stock,
            npcs: Vec::with_capacity(npcs.len()),
        };
        for npc in npcs {
            world.add_npc(npc)?;
        }
        Ok(world)
    }

    // -----------------------------------------------------------------------
    // Population
    // -----------------------------------------------------------------------

    /// Append an NPC. Fails if its ID is already taken.
    pub fn add_npc(&mut self, npc: Npc) -> CoreResult<NpcId> {
        if self.npcs.iter().any(|n| n.id == npc.id) {
            return Err(CoreError::DuplicateId(npc.id));
        }
        let id = npc.id;
        self.npcs.push(npc);
        Ok(id)
    }

    /// All NPCs in creation order.
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Mutable access to the NPCs. The slice cannot grow, so IDs stay unique.
    pub fn npcs_mut(&mut self) -> &mut [Npc] {
        &mut self.npcs
    }

    /// Look up an NPC by ID.
    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == id)
    }

    /// Iterate over living NPCs.
    pub fn living(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.iter().filter(|n| n.alive)
    }

    /// Number of living NPCs.
    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Check every invariant: unique IDs, vitals in range, non-negative stock.
    pub fn validate(&self) -> CoreResult<()> {
        if self.food_stock < 0 {
            return Err(CoreError::NegativeStock(self.food_stock));
        }
        let mut seen = HashSet::with_capacity(self.npcs.len());
        for npc in &self.npcs {
            if !seen.insert(npc.id) {
                return Err(CoreError::DuplicateId(npc.id));
            }
            npc.validate()?;
        }
        Ok(())
    }
}

/// Decode `npcs` leniently: anything other than an array becomes empty.
///
/// Individual malformed entries still fail, since silently dropping a
/// villager would change the population.
fn lenient_npcs<'de, D>(deserializer: D) -> Result<Vec<Npc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}
