use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::WorldArgs;

pub fn run(args: &WorldArgs, limit: i64, json: bool) -> Result<(), String> {
    let sim = super::open(args)?;
    let logs = sim.logs(limit);

    if json {
        let out = serde_json::to_string_pretty(&logs).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    if logs.is_empty() {
        println!("  No days simulated yet.");
        return Ok(());
    }

    let world = sim.world();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Day",
        "Food",
        "Eaten",
        "Harvest",
        "Shortfall",
        "Deaths",
    ]);

    for log in &logs {
        let deaths: Vec<String> = log
            .deaths()
            .map(|id| world.npc(id).map_or_else(|| id.to_string(), |n| n.name.clone()))
            .collect();
        table.add_row(vec![
            log.day.to_string(),
            format!("{} -> {}", log.food_stock_before, log.food_stock_after),
            log.consumed.to_string(),
            log.harvested.to_string(),
            log.shortfall.to_string(),
            if deaths.is_empty() {
                "-".to_string()
            } else {
                deaths.join(", ")
            },
        ]);
    }

    println!("{table}");

    let events: Vec<_> = logs.iter().flat_map(|log| log.events.iter()).collect();
    if !events.is_empty() {
        println!();
        println!("  {}", "Events".bold().underline());
        for event in events {
            let day = format!("[day {:>3}]", event.day).dimmed();
            println!("  {day} {}", super::colorize_event(&event.kind, &event.description));
        }
    }
    Ok(())
}
