//! Production system - farms fill the stockpile of the tile they stand on

use crate::components::{FactKind, FoodProducer, FoodStore};
use crate::error::SimError;
use crate::store::World;

use super::TickReport;

/// Add each farm's per-tick output to its tile's food store.
pub fn production_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    for entity in world.query(&[FactKind::FoodProducer, FactKind::Location], &[]) {
        let rate = world.fact::<FoodProducer>(entity)?.rate;
        let tile = world.tile_under(entity)?;
        world.get_mut::<FoodStore>(tile)?.deposit(rate);
        report.food_produced += rate as u64;
    }
    Ok(())
}
