use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dorf_core::{HEALTH, HUNGER, MOOD, Npc};
use dorf_simulation::SimClock;

use crate::WorldArgs;

pub fn run(args: &WorldArgs, json: bool) -> Result<(), String> {
    let sim = super::open(args)?;
    let world = sim.state();

    if json {
        let out = serde_json::to_string_pretty(&world).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let harvest = SimClock::new(world.day, sim.config().harvest_interval).days_until_harvest();
    println!(
        "  {} {}  {} {}  {} {}/{}  {}",
        "Day".bold(),
        world.day,
        "Food".bold(),
        world.food_stock,
        "Alive".bold(),
        world.alive_count(),
        world.npcs().len(),
        format!("(harvest in {harvest} day{})", if harvest == 1 { "" } else { "s" }).dimmed()
    );
    println!();

    if world.npcs().is_empty() {
        println!("  No villagers.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Job", "Hunger", "Health", "Mood", "Status"]);

    for npc in world.npcs() {
        table.add_row(vec![
            npc.name.clone(),
            npc.job.to_string(),
            format_bar(1.0 - fraction(npc.hunger, HUNGER.min, HUNGER.max), npc.hunger),
            format_bar(fraction(npc.health, HEALTH.min, HEALTH.max), npc.health),
            format_mood(npc),
            status(npc),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn fraction(value: i32, min: i32, max: i32) -> f64 {
    f64::from(value - min) / f64::from(max - min)
}

/// A ten-cell bar coloured by how good `val` (0.0 bad .. 1.0 good) is.
fn format_bar(val: f64, raw: i32) -> String {
    let filled = (val * 10.0).round().clamp(0.0, 10.0) as usize;
    let empty = 10_usize.saturating_sub(filled);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));

    if val <= 0.15 {
        format!("[{}] {raw:>3}", bar.red())
    } else if val <= 0.4 {
        format!("[{}] {raw:>3}", bar.yellow())
    } else {
        format!("[{}] {raw:>3}", bar.green())
    }
}

fn format_mood(npc: &Npc) -> String {
    let text = format!("{:>3}", npc.mood);
    let val = fraction(npc.mood, MOOD.min, MOOD.max);
    if val <= 0.25 {
        text.red().to_string()
    } else if val < 0.5 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

fn status(npc: &Npc) -> String {
    if npc.alive {
        "alive".green().to_string()
    } else {
        "DEAD".red().bold().to_string()
    }
}
