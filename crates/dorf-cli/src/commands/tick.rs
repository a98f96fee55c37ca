use colored::Colorize;

use crate::WorldArgs;

pub fn run(args: &WorldArgs, multiplier: i64, json: bool) -> Result<(), String> {
    let mut sim = super::open(args)?;
    let summary = sim.tick(multiplier).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string(&summary).map_err(|e| e.to_string())?;
        println!("{out}");
    }
    if !summary.ok {
        let reason = summary.error.unwrap_or_default();
        return Err(format!("tick rolled back: {reason}"));
    }
    super::persist(args, &sim.save())?;

    if !json {
        println!(
            "  {} {} {}",
            "Day".bold(),
            summary.day,
            format!("(food {}, +{multiplier} day{})", summary.food_stock, plural(multiplier)).dimmed()
        );
        for log in sim.logs(multiplier) {
            for event in &log.events {
                let day = format!("[day {:>3}]", event.day).dimmed();
                println!("  {day} {}", super::colorize_event(&event.kind, &event.description));
            }
        }
    }
    Ok(())
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
