//! Consumption system - settlements eat from their own tile

use crate::components::{FactKind, FoodConsumer, FoodStore};
use crate::error::SimError;
use crate::store::World;

use super::TickReport;

/// Withdraw each consumer's demand from its tile and record any shortfall
/// as unmet demand. The stockpile never drops below zero.
pub fn consumption_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    for entity in world.query(&[FactKind::FoodConsumer, FactKind::Location], &[]) {
        let demand = world.fact::<FoodConsumer>(entity)?.rate;
        let tile = world.tile_under(entity)?;
        let eaten = world.get_mut::<FoodStore>(tile)?.withdraw(demand);
        let unmet = demand - eaten;
        world.get_mut::<FoodConsumer>(entity)?.unmet_last_tick = unmet;

        report.food_consumed += eaten as u64;
        report.food_unmet += unmet as u64;
    }
    Ok(())
}
