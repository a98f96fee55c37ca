use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, TryLockError};

use dorf_core::WorldState;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::event::DayLog;
use crate::simulation::{SaveFile, Simulation, TickSummary, settle_failure, validate_multiplier};

/// A simulation that can be driven from several threads.
///
/// Reads never block on a running tick for longer than its final commit:
/// the tick is planned under a read lock and applied under a brief write
/// lock. Only one tick runs at a time; a second caller gets
/// [`SimError::Busy`]. `reset` waits for any running tick to finish.
#[derive(Debug, Clone)]
pub struct SharedSimulation {
    sim: Arc<RwLock<Simulation>>,
    gate: Arc<Mutex<()>>,
}

impl SharedSimulation {
    /// Wrap a simulation for shared use.
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim: Arc::new(RwLock::new(sim)),
            gate: Arc::new(Mutex::new(())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Simulation> {
        self.sim.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Simulation> {
        self.sim.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance by `multiplier` days. See [`Simulation::tick`].
    ///
    /// Also returns the world as it stood right after this tick, before any
    /// other caller could change it.
    pub fn tick(&self, multiplier: i64) -> SimResult<(TickSummary, WorldState)> {
        let days = validate_multiplier(multiplier)?;
        let _gate = match self.gate.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!(multiplier, "tick rejected, another tick is running");
                return Err(SimError::Busy);
            }
        };

        // Nothing else can mutate while the gate is held, so the plan
        // computed under the read lock is still current at commit time.
        let planned = self.read().plan(days);
        let mut sim = self.write();
        let summary = match planned.and_then(|plan| sim.commit(plan)) {
            Ok(()) => TickSummary::applied(sim.world()),
            Err(e) => settle_failure(sim.world(), e)?,
        };
        Ok((summary, sim.state()))
    }

    /// A full copy of the current world.
    pub fn state(&self) -> WorldState {
        self.read().state()
    }

    /// Return to day 0, after any running tick has finished.
    ///
    /// Returns the world that was installed.
    pub fn reset(&self) -> WorldState {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        let mut sim = self.write();
        sim.reset();
        sim.state()
    }

    /// The newest `limit` day logs in chronological order.
    pub fn logs(&self, limit: i64) -> Vec<DayLog> {
        self.read().logs(limit)
    }

    /// Snapshot the world and journal for saving.
    pub fn save(&self) -> SaveFile {
        self.read().save()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::SimConfig;

    fn shared() -> SharedSimulation {
        SharedSimulation::new(Simulation::new(SimConfig::default()).unwrap())
    }

    #[test]
    fn tick_and_state() {
        let shared = shared();
        let (summary, world) = shared.tick(2).unwrap();
        assert!(summary.ok);
        assert_eq!(world.day, 2);
        assert_eq!(shared.state(), world);
        assert_eq!(shared.logs(10).len(), 2);
    }

    #[test]
    fn tick_while_gate_held_is_busy() {
        let shared = shared();
        let _held = shared.gate.lock().unwrap();
        assert_eq!(shared.tick(1).unwrap_err(), SimError::Busy);
        assert_eq!(shared.state().day, 0);
    }

    #[test]
    fn invalid_multiplier_checked_before_gate() {
        let shared = shared();
        let _held = shared.gate.lock().unwrap();
        assert_eq!(shared.tick(0).unwrap_err(), SimError::InvalidMultiplier(0));
    }

    #[test]
    fn reset_after_ticks() {
        let shared = shared();
        let start = shared.state();
        shared.tick(3).unwrap();
        assert_eq!(shared.reset(), start);
        assert_eq!(shared.state(), start);
        assert!(shared.logs(10).is_empty());
    }

    #[test]
    fn concurrent_ticks_never_lose_days() {
        let shared = shared();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.tick(1))
            })
            .collect();
        let applied = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| matches!(r, Ok((s, _)) if s.ok))
            .count() as u64;
        assert!(applied >= 1);
        assert_eq!(shared.state().day, applied);
    }

    #[test]
    fn readers_see_whole_ticks() {
        let shared = shared();
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let _ = shared.tick(1);
                }
            })
        };
        let mut last_day = 0;
        for _ in 0..50 {
            let state = shared.state();
            state.validate().unwrap();
            assert!(state.day >= last_day);
            last_day = state.day;
        }
        writer.join().unwrap();
    }
}
