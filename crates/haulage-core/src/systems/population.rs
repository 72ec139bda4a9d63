//! Population system - starvation losses and consumption demand

use crate::components::{FactKind, FoodConsumer, Population};
use crate::error::SimError;
use crate::store::World;

use super::TickReport;

/// Settle last tick's hunger and set this tick's demand.
///
/// Each unit of unmet demand costs one person. The consumption rate then
/// tracks the new headcount. Settlements with nobody left are destroyed.
pub fn population_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    // Newly founded settlements start eating
    for entity in world.query(&[FactKind::Population], &[FactKind::FoodConsumer]) {
        world.attach(entity, FoodConsumer::default())?;
    }

    for entity in world.query(&[FactKind::Population, FactKind::FoodConsumer], &[]) {
        let unmet = world.fact::<FoodConsumer>(entity)?.unmet_last_tick;
        let population = world.get_mut::<Population>(entity)?;
        let lost = population.starve(unmet);
        let count = population.count;
        world.get_mut::<FoodConsumer>(entity)?.rate = count;
        report.population_lost += lost as u64;
    }

    for entity in world.query(&[FactKind::Population], &[]) {
        if world.fact::<Population>(entity)?.is_empty() {
            world.destroy(entity)?;
            report.settlements_abandoned += 1;
            log::debug!("Settlement {:?} abandoned", entity);
        }
    }

    Ok(())
}
