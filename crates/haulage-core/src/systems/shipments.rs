//! Shipment creation - greedy allocation of farm stockpiles to hungry settlements

use hecs::Entity;

use crate::components::{FactKind, FoodConsumer, FoodStore, Location};
use crate::error::{SimError, StoreError};
use crate::generation::spawn_shipment;
use crate::store::World;

use super::TickReport;

/// For every settlement that went hungry last pass, draw its full demand
/// from farm tiles and send it as shipments.
///
/// Farms are tried farthest first; the nearest farms are the last resort.
/// One shipment is created per farm that actually gives food. Farm tiles
/// are shared between consumers, so this stage must run sequentially.
pub fn shipment_creation_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    let producers = world.query(&[FactKind::FoodProducer, FactKind::Location], &[]);

    for consumer in world.query(&[FactKind::FoodConsumer, FactKind::Location], &[]) {
        let needs = world.fact::<FoodConsumer>(consumer)?;
        if !needs.is_starving() {
            continue;
        }
        let destination = world.fact::<Location>(consumer)?.tile;
        let mut demand = needs.rate;

        for producer in farthest_first(world, &producers, consumer) {
            if demand == 0 {
                break;
            }
            let origin = world.fact::<Location>(producer)?.tile;
            let tile = world.tile_at(origin).ok_or(StoreError::NoTileAt(origin))?;
            let taken = world.get_mut::<FoodStore>(tile)?.withdraw(demand);
            // An empty farm sends nothing, not an empty shipment
            if taken == 0 {
                continue;
            }
            demand -= taken;

            let shipment = spawn_shipment(world, taken, origin, destination);
            report.shipments_created += 1;
            report.food_shipped += taken as u64;
            log::trace!(
                "Shipment {:?}: {} food from tile {} to tile {}",
                shipment,
                taken,
                origin,
                destination
            );
        }
    }

    Ok(())
}

/// Producers ordered by descending distance from `consumer`. Ties keep
/// query order.
fn farthest_first(world: &World, producers: &[Entity], consumer: Entity) -> Vec<Entity> {
    let mut ranked: Vec<(f64, Entity)> = producers
        .iter()
        .map(|&p| (world.distance(p, consumer), p))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, p)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{FoodProducer, Population, Shipment};
    use haulage_logic::Board;

    fn stock(world: &mut World, index: u32, amount: u32) {
        let tile = world.tile_at(index).unwrap();
        world.get_mut::<FoodStore>(tile).unwrap().amount = amount;
    }

    fn hungry_city(world: &mut World, index: u32, rate: u32) -> Entity {
        world.spawn((
            Location::new(index),
            Population::new(rate),
            FoodConsumer {
                rate,
                unmet_last_tick: 1,
            },
        ))
    }

    fn shipments(world: &World) -> Vec<(u32, u32, u32)> {
        world
            .query(&[FactKind::Shipment], &[])
            .into_iter()
            .map(|s| {
                (
                    world.fact::<Location>(s).unwrap().tile,
                    world.fact::<Shipment>(s).unwrap().destination,
                    world.fact::<FoodStore>(s).unwrap().amount,
                )
            })
            .collect()
    }

    #[test]
    fn test_farthest_farm_served_first() {
        // 8x1 strip: city at 0, near farm at 1, far farm at 5
        let mut world = World::new(Board::new(8, 1));
        world.spawn((Location::new(1), FoodProducer::new(10)));
        world.spawn((Location::new(5), FoodProducer::new(10)));
        stock(&mut world, 1, 4);
        stock(&mut world, 5, 4);
        hungry_city(&mut world, 0, 4);

        let mut report = TickReport::default();
        shipment_creation_system(&mut world, &mut report).unwrap();

        assert_eq!(shipments(&world), vec![(5, 0, 4)]);
        assert_eq!(report.shipments_created, 1);
        assert_eq!(report.food_shipped, 4);
        assert_eq!(world.fact::<FoodStore>(world.tile_at(5).unwrap()).unwrap().amount, 0);
        assert_eq!(world.fact::<FoodStore>(world.tile_at(1).unwrap()).unwrap().amount, 4);
    }

    #[test]
    fn test_demand_split_across_farms() {
        let mut world = World::new(Board::new(8, 1));
        world.spawn((Location::new(1), FoodProducer::new(10)));
        world.spawn((Location::new(5), FoodProducer::new(10)));
        stock(&mut world, 1, 10);
        stock(&mut world, 5, 3);
        hungry_city(&mut world, 0, 7);

        let mut report = TickReport::default();
        shipment_creation_system(&mut world, &mut report).unwrap();

        assert_eq!(shipments(&world), vec![(5, 0, 3), (1, 0, 4)]);
        assert_eq!(world.fact::<FoodStore>(world.tile_at(1).unwrap()).unwrap().amount, 6);
    }

    #[test]
    fn test_empty_farms_send_nothing() {
        let mut world = World::new(Board::new(8, 1));
        world.spawn((Location::new(3), FoodProducer::new(10)));
        hungry_city(&mut world, 0, 5);

        let mut report = TickReport::default();
        shipment_creation_system(&mut world, &mut report).unwrap();

        assert!(shipments(&world).is_empty());
        assert_eq!(report.shipments_created, 0);
    }

    #[test]
    fn test_fed_settlement_requests_nothing() {
        let mut world = World::new(Board::new(8, 1));
        world.spawn((Location::new(3), FoodProducer::new(10)));
        stock(&mut world, 3, 10);
        world.spawn((
            Location::new(0),
            Population::new(5),
            FoodConsumer {
                rate: 5,
                unmet_last_tick: 0,
            },
        ));

        let mut report = TickReport::default();
        shipment_creation_system(&mut world, &mut report).unwrap();

        assert!(shipments(&world).is_empty());
    }

    #[test]
    fn test_consumers_compete_for_one_farm() {
        let mut world = World::new(Board::new(8, 1));
        world.spawn((Location::new(4), FoodProducer::new(10)));
        stock(&mut world, 4, 6);
        hungry_city(&mut world, 0, 4);
        hungry_city(&mut world, 7, 4);

        let mut report = TickReport::default();
        shipment_creation_system(&mut world, &mut report).unwrap();

        // The first consumer in query order takes 4, the second gets the rest
        assert_eq!(report.food_shipped, 6);
        assert_eq!(report.shipments_created, 2);
        assert_eq!(world.fact::<FoodStore>(world.tile_at(4).unwrap()).unwrap().amount, 0);
    }
}
