use std::thread;
use std::time::Duration;

use colored::Colorize;
use dorf_simulation::{SharedSimulation, SimError};
use tracing::warn;

use crate::WorldArgs;

/// Drive the simulation one day per interval.
///
/// A tick that cannot start because another is still running is skipped,
/// not queued, so the cadence never drifts into a backlog.
pub fn run(args: &WorldArgs, days: u32, interval_ms: u64) -> Result<(), String> {
    let shared = SharedSimulation::new(super::open(args)?);
    let interval = Duration::from_millis(interval_ms);

    for n in 0..days {
        if n > 0 {
            thread::sleep(interval);
        }
        match shared.tick(1) {
            Ok((summary, world)) if summary.ok => {
                let alive = world.alive_count();
                println!(
                    "  {} {:>4}  food {:>5}  alive {alive}",
                    "Day".bold(),
                    summary.day,
                    summary.food_stock
                );
                for log in shared.logs(1) {
                    for event in &log.events {
                        println!("        {}", super::colorize_event(&event.kind, &event.description));
                    }
                }
            }
            Ok((summary, _)) => {
                let reason = summary.error.unwrap_or_default();
                super::persist(args, &shared.save())?;
                return Err(format!("tick rolled back on day {}: {reason}", summary.day));
            }
            Err(SimError::Busy) => warn!("previous tick still running, skipping"),
            Err(e) => return Err(e.to_string()),
        }
    }

    super::persist(args, &shared.save())
}
