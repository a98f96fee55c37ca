use crate::WorldArgs;

pub fn run(args: &WorldArgs) -> Result<(), String> {
    let mut sim = super::open(args)?;
    sim.reset();
    super::persist(args, &sim.save())?;

    let world = sim.world();
    println!(
        "  Reset to day {} with {} food and {} villagers",
        world.day,
        world.food_stock,
        world.npcs().len()
    );
    Ok(())
}
