pub mod logs;
pub mod reset;
pub mod run;
pub mod serve;
pub mod state;
pub mod tick;

use std::fs;

use colored::Colorize;
use dorf_simulation::{SaveFile, SimConfig, SimEventKind, Simulation};
use tracing::debug;

use crate::WorldArgs;

/// Load the configuration named by `--config`, or the built-in village.
fn load_config(args: &WorldArgs) -> Result<SimConfig, String> {
    let Some(path) = &args.config else {
        return Ok(SimConfig::default());
    };
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    SimConfig::from_json(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

/// Build the simulation for this invocation.
///
/// With `--state`, an existing file is resumed; a missing one means a fresh
/// day-0 world that will be written on the first mutation.
fn open(args: &WorldArgs) -> Result<Simulation, String> {
    let config = load_config(args)?;
    let Some(path) = &args.state else {
        return Simulation::new(config).map_err(|e| e.to_string());
    };
    if !path.exists() {
        debug!(path = %path.display(), "no saved world, starting fresh");
        return Simulation::new(config).map_err(|e| e.to_string());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read state {}: {e}", path.display()))?;
    let save: SaveFile = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid state file {}: {e}", path.display()))?;
    Simulation::restore(config, save).map_err(|e| format!("{}: {e}", path.display()))
}

/// Write the world back to `--state`, if one was given.
fn persist(args: &WorldArgs, save: &SaveFile) -> Result<(), String> {
    let Some(path) = &args.state else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(save).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write state {}: {e}", path.display()))?;
    debug!(path = %path.display(), day = save.world.day, "world saved");
    Ok(())
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::Died { .. } => description.red().bold(),
        SimEventKind::HungerCritical { .. } => description.yellow(),
        SimEventKind::Famine { .. } => description.red(),
        SimEventKind::Harvest { .. } => description.green(),
    }
}
