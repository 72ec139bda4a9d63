//! Shipment advance - move shipments one tile along their route

use haulage_logic::TileIndex;
use hecs::Entity;

use crate::components::{FactKind, FoodStore, Location, Route, Shipment};
use crate::error::{SimError, StoreError};
use crate::store::World;

use super::TickReport;

/// Move every routed shipment one step, delivering it on arrival.
///
/// Before moving, the route is checked: the cursor tile must be where the
/// shipment stands and the route must end at its destination. A shipment
/// failing either check loses its route and waits for replanning.
///
/// Steps are not checked for adjacency. A route that is not a chain of
/// neighboring tiles moves the shipment straight to whatever tile it names.
pub fn shipment_advance_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    let moving = world.query(
        &[
            FactKind::Shipment,
            FactKind::Location,
            FactKind::Route,
            FactKind::FoodStore,
        ],
        &[],
    );

    for entity in moving {
        let destination = world.fact::<Shipment>(entity)?.destination;
        let here = world.fact::<Location>(entity)?.tile;

        if !world.get::<Route>(entity)?.is_intact(here, destination) {
            world.detach::<Route>(entity)?;
            report.routes_dropped += 1;
            log::warn!("Shipment {:?} lost its route at tile {}", entity, here);
            continue;
        }

        if here == destination {
            deliver(world, entity, destination, report)?;
            continue;
        }

        let (next, left) = {
            let route = world.get_mut::<Route>(entity)?;
            (route.step(), route.remaining())
        };
        let Some(next) = next else {
            // Unreachable while the route is intact and we are not home yet
            world.detach::<Route>(entity)?;
            report.routes_dropped += 1;
            continue;
        };
        world.get_mut::<Location>(entity)?.tile = next;
        log::trace!("Shipment {:?} at tile {}, {} steps to go", entity, next, left);

        if next == destination {
            deliver(world, entity, destination, report)?;
        }
    }

    Ok(())
}

/// Unload a shipment's cargo into the destination tile and destroy it.
fn deliver(
    world: &mut World,
    entity: Entity,
    destination: TileIndex,
    report: &mut TickReport,
) -> Result<(), SimError> {
    let cargo = world.fact::<FoodStore>(entity)?.amount;
    let tile = world
        .tile_at(destination)
        .ok_or(StoreError::NoTileAt(destination))?;
    world.get_mut::<FoodStore>(tile)?.deposit(cargo);
    world.destroy(entity)?;

    report.shipments_delivered += 1;
    report.food_delivered += cargo as u64;
    log::trace!("Shipment {:?} delivered {} food to tile {}", entity, cargo, destination);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulage_logic::Board;

    fn world_with_shipment(route: Vec<u32>, at: u32, to: u32, cargo: u32) -> (World, Entity) {
        let mut world = World::new(Board::new(4, 4));
        let ship = world.spawn((
            Location::new(at),
            Shipment::new(to),
            FoodStore::new(cargo),
            Route::new(route),
        ));
        (world, ship)
    }

    fn tile_food(world: &World, index: u32) -> u32 {
        world.fact::<FoodStore>(world.tile_at(index).unwrap()).unwrap().amount
    }

    #[test]
    fn test_two_steps_to_delivery() {
        let (mut world, ship) = world_with_shipment(vec![5, 9, 13], 5, 13, 4);
        let mut report = TickReport::default();

        shipment_advance_system(&mut world, &mut report).unwrap();
        assert!(world.contains(ship));
        assert_eq!(world.fact::<Location>(ship).unwrap().tile, 9);
        assert_eq!(world.get::<Route>(ship).unwrap().cursor, 1);

        shipment_advance_system(&mut world, &mut report).unwrap();
        assert!(!world.contains(ship));
        assert_eq!(tile_food(&world, 13), 4);
        assert_eq!(report.shipments_delivered, 1);
        assert_eq!(report.food_delivered, 4);
    }

    #[test]
    fn test_already_home_delivers_immediately() {
        let (mut world, ship) = world_with_shipment(vec![6], 6, 6, 7);
        let mut report = TickReport::default();

        shipment_advance_system(&mut world, &mut report).unwrap();
        assert!(!world.contains(ship));
        assert_eq!(tile_food(&world, 6), 7);
    }

    #[test]
    fn test_moved_shipment_loses_route() {
        let (mut world, ship) = world_with_shipment(vec![5, 9, 13], 5, 13, 4);
        world.get_mut::<Location>(ship).unwrap().tile = 2;

        let mut report = TickReport::default();
        shipment_advance_system(&mut world, &mut report).unwrap();

        assert!(world.contains(ship));
        assert_eq!(world.fact::<Location>(ship).unwrap().tile, 2);
        assert_eq!(world.has(ship, FactKind::Route), Ok(false));
        assert_eq!(report.routes_dropped, 1);
    }

    #[test]
    fn test_route_to_wrong_destination_dropped() {
        let (mut world, ship) = world_with_shipment(vec![5, 9, 13], 5, 12, 4);
        let mut report = TickReport::default();
        shipment_advance_system(&mut world, &mut report).unwrap();

        assert_eq!(world.has(ship, FactKind::Route), Ok(false));
        assert_eq!(world.fact::<Location>(ship).unwrap().tile, 5);
    }

    #[test]
    fn test_empty_route_dropped() {
        let (mut world, ship) = world_with_shipment(vec![], 0, 3, 1);
        let mut report = TickReport::default();
        shipment_advance_system(&mut world, &mut report).unwrap();

        assert!(world.contains(ship));
        assert_eq!(world.has(ship, FactKind::Route), Ok(false));
    }

    #[test]
    fn test_non_adjacent_route_teleports() {
        let (mut world, ship) = world_with_shipment(vec![0, 15, 3], 0, 3, 1);
        let mut report = TickReport::default();
        shipment_advance_system(&mut world, &mut report).unwrap();

        assert_eq!(world.fact::<Location>(ship).unwrap().tile, 15);
    }
}
