//! Property-based tests for the simulation.
use dorf_core::{HEALTH, HUNGER, MOOD};
use dorf_simulation::{SimConfig, Simulation};
use proptest::prelude::*;

fn config(seed: u64, food: i64, interval: u64) -> SimConfig {
    SimConfig::default()
        .with_seed(seed)
        .with_starting_food(food)
        .with_harvest_interval(interval)
        .with_max_day_logs(64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn vitals_stay_in_range(
        seed in any::<u64>(),
        food in 0i64..300,
        interval in 1u64..15,
        steps in prop::collection::vec(1i64..20, 1..8),
    ) {
        let mut sim = Simulation::new(config(seed, food, interval)).unwrap();
        for step in steps {
            prop_assert!(sim.tick(step).unwrap().ok);
            let world = sim.state();
            prop_assert!(world.food_stock >= 0);
            for npc in world.npcs() {
                prop_assert!(HUNGER.contains(npc.hunger));
                prop_assert!(HEALTH.contains(npc.health));
                prop_assert!(MOOD.contains(npc.mood));
                prop_assert_eq!(npc.alive, npc.health > HEALTH.min);
            }
        }
    }

    #[test]
    fn batched_tick_equals_repeated_single_ticks(
        seed in any::<u64>(),
        food in 0i64..200,
        interval in 1u64..10,
        days in 1i64..40,
    ) {
        let mut single = Simulation::new(config(seed, food, interval)).unwrap();
        let mut batched = Simulation::new(config(seed, food, interval)).unwrap();
        for _ in 0..days {
            single.tick(1).unwrap();
        }
        batched.tick(days).unwrap();
        prop_assert_eq!(single.state(), batched.state());
        prop_assert_eq!(single.logs(100), batched.logs(100));
    }

    #[test]
    fn day_advances_by_multiplier(
        steps in prop::collection::vec(1i64..50, 1..10),
    ) {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let mut expected = 0u64;
        for step in steps {
            let summary = sim.tick(step).unwrap();
            expected += step as u64;
            prop_assert_eq!(summary.day, expected);
            prop_assert_eq!(sim.state().day, expected);
        }
    }

    #[test]
    fn the_dead_stay_dead_and_unchanged(
        food in 0i64..20,
        steps in prop::collection::vec(1i64..10, 1..12),
    ) {
        let mut sim = Simulation::new(config(42, food, 1_000)).unwrap();
        let mut previous = sim.state();
        for step in steps {
            sim.tick(step).unwrap();
            let current = sim.state();
            for (before, after) in previous.npcs().iter().zip(current.npcs()) {
                if !before.alive {
                    prop_assert_eq!(before, after);
                }
            }
            previous = current;
        }
    }

    #[test]
    fn reset_always_returns_to_start(
        seed in any::<u64>(),
        days in 1i64..30,
    ) {
        let mut sim = Simulation::new(config(seed, 100, 7)).unwrap();
        let start = sim.state();
        sim.tick(days).unwrap();
        sim.reset();
        prop_assert_eq!(sim.state(), start);
    }

    #[test]
    fn non_positive_multipliers_are_rejected(multiplier in i64::MIN..=0) {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let before = sim.state();
        prop_assert!(sim.tick(multiplier).is_err());
        prop_assert_eq!(sim.state(), before);
    }
}
