//! Random placement of farms and settlements on an initialized world

use hecs::Entity;
use rand::Rng;

use super::world::{spawn_farm, spawn_settlement};
use crate::components::Location;
use crate::config::SimConfig;
use crate::store::World;

/// Entities placed by [`populate`]
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub farms: Vec<Entity>,
    pub settlements: Vec<Entity>,
}

/// Scatter the configured number of farms and settlements over the board,
/// then put a farm under the first `home_farms` settlements.
/// Several entities may land on the same tile.
pub fn populate(world: &mut World, config: &SimConfig, rng: &mut impl Rng) -> Placement {
    let tiles = world.board().tile_count();
    let home = config.home_farms.min(config.settlements);
    let mut placement = Placement {
        farms: Vec::with_capacity((config.farms + home) as usize),
        settlements: Vec::with_capacity(config.settlements as usize),
    };

    for _ in 0..config.farms {
        let tile = rng.gen_range(0..tiles);
        placement.farms.push(spawn_farm(world, tile, config.farm_rate));
    }

    for _ in 0..config.settlements {
        let tile = rng.gen_range(0..tiles);
        let population = rng.gen_range(config.min_population..=config.max_population);
        placement
            .settlements
            .push(spawn_settlement(world, tile, population));
    }

    for &city in placement.settlements.iter().take(home as usize) {
        if let Ok(home_tile) = world.fact::<Location>(city) {
            placement
                .farms
                .push(spawn_farm(world, home_tile.tile, config.farm_rate));
        }
    }

    log::info!(
        "Placed {} farms and {} settlements",
        placement.farms.len(),
        placement.settlements.len()
    );

    placement
}
