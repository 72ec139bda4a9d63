//! World initialization and entity spawn helpers

use haulage_logic::{Board, TileIndex, WorldSize};
use hecs::Entity;

use crate::components::{FoodProducer, FoodStore, Location, Population, Shipment};
use crate::store::World;

/// Create a square world of the given size: the board singleton and one
/// tile per cell. Settlements and farms are added afterwards.
pub fn initialize_world(size: WorldSize) -> World {
    World::new(Board::square(size))
}

/// Found a settlement. It starts consuming on the next population pass.
pub fn spawn_settlement(world: &mut World, tile: TileIndex, population: u32) -> Entity {
    world.spawn((Location::new(tile), Population::new(population)))
}

/// Place a farm producing `rate` food per tick.
pub fn spawn_farm(world: &mut World, tile: TileIndex, rate: u32) -> Entity {
    world.spawn((Location::new(tile), FoodProducer::new(rate)))
}

/// Load `amount` food onto a new shipment at `from`, bound for `to`.
/// The route is planned later.
pub fn spawn_shipment(world: &mut World, amount: u32, from: TileIndex, to: TileIndex) -> Entity {
    world.spawn((Location::new(from), Shipment::new(to), FoodStore::new(amount)))
}
