use dorf_core::{HEALTH, HUNGER, MOOD, Npc};
use tracing::info;

use crate::config::VitalsConfig;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::{NpcChange, SimEventKind};
use crate::system::System;

/// Mood for the given vitals: content minus weighted hunger and missing health.
pub fn mood_for(hunger: i32, health: i32, satisfaction: i32, rules: &VitalsConfig) -> i32 {
    let hunger_cost = hunger * rules.hunger_mood_weight / 100;
    let health_cost = (HEALTH.max - health) * rules.health_mood_weight / 100;
    MOOD.clamp(MOOD.max + satisfaction - hunger_cost - health_cost)
}

/// Apply one day of vital rules to a single NPC.
///
/// Order: meal relief (if fed), hunger gain, health change, mood, death.
/// Returns `None` for an NPC that was already dead; its fields are left
/// untouched.
pub fn live_one_day(
    npc: &mut Npc,
    fed: bool,
    famine: bool,
    satisfaction: i32,
    rules: &VitalsConfig,
) -> Option<NpcChange> {
    if !npc.alive {
        return None;
    }
    let (hunger_before, health_before, mood_before) = (npc.hunger, npc.health, npc.mood);

    let mut hunger = npc.hunger;
    if fed {
        hunger = HUNGER.clamp(hunger - rules.meal_relief);
    }
    hunger = HUNGER.clamp(hunger + rules.hunger_per_day);

    let mut health_delta = if hunger > rules.starvation_threshold {
        -rules.starvation_penalty
    } else {
        rules.recovery_per_day
    };
    if famine {
        health_delta -= rules.famine_penalty;
    }
    let health = HEALTH.clamp(npc.health + health_delta);

    npc.hunger = hunger;
    npc.health = health;
    npc.mood = mood_for(hunger, health, satisfaction, rules);

    let died = npc.health <= HEALTH.min && npc.kill();

    Some(NpcChange {
        npc_id: npc.id,
        hunger_before,
        hunger_after: npc.hunger,
        health_before,
        health_after: npc.health,
        mood_before,
        mood_after: npc.mood,
        fed,
        died,
    })
}

/// Ages every living NPC by one day: hunger, health, mood, and death.
#[derive(Debug, Default)]
pub struct LifecycleSystem;

impl LifecycleSystem {
    /// Create the lifecycle system.
    pub fn new() -> Self {
        Self
    }
}

impl System for LifecycleSystem {
    fn name(&self) -> &str {
        "lifecycle"
    }

    fn tick(&self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let config = ctx.config;
        let rules = &config.rules;
        let famine = ctx.provisions.is_famine();
        let mut changes = Vec::with_capacity(ctx.world.npcs().len());
        let mut notices = Vec::new();

        for npc in ctx.world.npcs_mut() {
            let fed = ctx.provisions.is_fed(npc.id);
            let satisfaction = config.jobs.profile(&npc.job).satisfaction;
            let Some(change) = live_one_day(npc, fed, famine, satisfaction, rules) else {
                continue;
            };

            if change.hunger_before <= rules.starvation_threshold
                && change.hunger_after > rules.starvation_threshold
            {
                notices.push((
                    SimEventKind::HungerCritical { npc: npc.id },
                    format!("{} is starving", npc.name),
                ));
            }
            if change.died {
                let cause = if famine { "famine" } else { "starvation" };
                info!(day = ctx.clock.day(), npc = %npc.id, name = %npc.name, cause, "npc died");
                notices.push((
                    SimEventKind::Died {
                        npc: npc.id,
                        cause: cause.to_string(),
                    },
                    format!("{} died of {cause}", npc.name),
                ));
            }
            changes.push(change);
        }

        ctx.log.npc_changes.extend(changes);
        for (kind, description) in notices {
            ctx.emit(kind, description);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorf_core::{Job, NpcId};

    fn villager() -> Npc {
        Npc::new(NpcId::new(), "Ansel", Job::Farmer).with_mood(50)
    }

    #[test]
    fn fed_npc_gains_full_increment_from_zero() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        let change = live_one_day(&mut npc, true, false, 5, &rules).unwrap();
        assert_eq!(change.hunger_after, 10);
        assert_eq!(npc.health, 100);
        assert!(npc.alive);
    }

    #[test]
    fn meal_relief_offsets_hunger() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        npc.hunger = 50;
        live_one_day(&mut npc, true, false, 0, &rules);
        assert_eq!(npc.hunger, 40);
        npc.hunger = 50;
        live_one_day(&mut npc, false, false, 0, &rules);
        assert_eq!(npc.hunger, 60);
    }

    #[test]
    fn high_hunger_costs_health() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        npc.hunger = 70;
        live_one_day(&mut npc, false, false, 0, &rules);
        assert_eq!(npc.hunger, 80);
        assert_eq!(npc.health, 95);
    }

    #[test]
    fn famine_adds_penalty() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        live_one_day(&mut npc, false, true, 0, &rules);
        // +1 recovery, -8 famine
        assert_eq!(npc.health, 93);
    }

    #[test]
    fn hunger_and_health_clamp() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        npc.hunger = 98;
        npc.health = 3;
        let change = live_one_day(&mut npc, false, true, 0, &rules).unwrap();
        assert_eq!(npc.hunger, HUNGER.max);
        assert_eq!(npc.health, HEALTH.min);
        assert!(change.died);
        assert!(!npc.alive);
    }

    #[test]
    fn dead_npc_is_frozen() {
        let rules = VitalsConfig::default();
        let mut npc = villager();
        npc.health = 0;
        npc.hunger = 100;
        npc.mood = -12;
        npc.kill();
        let before = npc.clone();
        assert!(live_one_day(&mut npc, true, false, 0, &rules).is_none());
        assert_eq!(npc, before);
    }

    #[test]
    fn mood_formula() {
        let rules = VitalsConfig::default();
        assert_eq!(mood_for(0, 100, 0, &rules), 50);
        assert_eq!(mood_for(10, 100, 0, &rules), 44);
        assert_eq!(mood_for(100, 50, 0, &rules), 50 - 60 - 20);
        assert_eq!(mood_for(100, 0, 0, &rules), MOOD.min);
        assert_eq!(mood_for(0, 100, 30, &rules), MOOD.max);
    }
}
