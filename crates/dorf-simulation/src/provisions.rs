use tracing::{info, warn};

use crate::context::{Provisions, SimContext};
use crate::error::{SimError, SimResult};
use crate::event::SimEventKind;
use crate::system::System;

/// Draws daily rations from the shared stock and brings in the harvest.
///
/// Rations are drawn in population order while the stock lasts. An NPC
/// whose ration cannot be covered takes whatever is left and goes unfed;
/// the unmet remainder is the day's shortfall. The stock never drops
/// below zero. Dead NPCs draw nothing.
#[derive(Debug, Default)]
pub struct ProvisionSystem;

impl ProvisionSystem {
    /// Create the provisions system.
    pub fn new() -> Self {
        Self
    }

    fn draw_rations(ctx: &mut SimContext<'_>) -> SimResult<Provisions> {
        let mut provisions = Provisions::default();
        let mut stock = ctx.world.food_stock;
        let mut consumed: i64 = 0;

        for npc in ctx.world.living() {
            let ration = ctx.config.jobs.profile(&npc.job).ration;
            let drawn = ration.min(stock.max(0));
            stock -= drawn;
            consumed = consumed
                .checked_add(drawn)
                .ok_or(SimError::Overflow("consumption"))?;
            if drawn == ration {
                provisions.fed.insert(npc.id);
            } else {
                provisions.shortfall = provisions
                    .shortfall
                    .checked_add(ration - drawn)
                    .ok_or(SimError::Overflow("shortfall"))?;
            }
        }

        ctx.world.food_stock = stock;
        ctx.log.consumed = consumed;
        ctx.log.shortfall = provisions.shortfall;
        Ok(provisions)
    }

    fn harvest(ctx: &mut SimContext<'_>) -> SimResult<()> {
        if !ctx.clock.is_harvest_day() {
            return Ok(());
        }
        let mut amount: i64 = 0;
        for npc in ctx.world.living() {
            amount = amount
                .checked_add(ctx.config.jobs.profile(&npc.job).harvest_yield)
                .ok_or(SimError::Overflow("harvest"))?;
        }
        if amount == 0 {
            return Ok(());
        }

        ctx.world.food_stock = ctx
            .world
            .food_stock
            .checked_add(amount)
            .ok_or(SimError::Overflow("food stock"))?;
        ctx.log.harvested = amount;
        info!(day = ctx.day(), amount, "harvest brought in");
        ctx.emit(
            SimEventKind::Harvest { amount },
            format!("the harvest brought in {amount} food"),
        );
        Ok(())
    }
}

impl System for ProvisionSystem {
    fn name(&self) -> &str {
        "provisions"
    }

    fn tick(&self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let provisions = Self::draw_rations(ctx)?;
        if provisions.is_famine() {
            let shortfall = provisions.shortfall;
            warn!(day = ctx.day(), shortfall, "food stock ran short");
            ctx.emit(
                SimEventKind::Famine { shortfall },
                format!("the stores ran {shortfall} rations short"),
            );
        }
        ctx.provisions = provisions;
        Self::harvest(ctx)
    }
}
