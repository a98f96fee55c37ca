use dorf_core::{Npc, NpcId, WorldState};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::lifecycle::mood_for;

/// Build the deterministic day-0 world described by `config`.
///
/// NPC IDs come from an RNG seeded with `config.seed`, so the same config
/// always yields the same IDs. Mood starts at whatever the mood formula
/// gives for a sated, healthy villager of that job.
pub fn starting_world(config: &SimConfig) -> SimResult<WorldState> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut world = WorldState::new(config.starting_food);
    for resident in &config.population {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let mut npc = Npc::new(
            NpcId::from_random_bytes(bytes),
            resident.name.clone(),
            resident.job.clone(),
        );
        let satisfaction = config.jobs.profile(&npc.job).satisfaction;
        npc.mood = mood_for(npc.hunger, npc.health, satisfaction, &config.rules);
        world.add_npc(npc)?;
    }
    Ok(world)
}
