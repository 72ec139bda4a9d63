//! Route planning - compute paths for shipments that have none
//!
//! All pending shipments are planned in the same tick. A shipment whose
//! destination is unreachable gets an empty route; the advance stage drops
//! it again and planning is retried next tick.

use haulage_logic::tile_route;

use crate::components::{FactKind, Location, Route, Shipment};
use crate::error::SimError;
use crate::store::World;

use super::TickReport;

/// Attach a route from the current tile to the destination to every
/// shipment lacking one.
pub fn route_planning_system(world: &mut World, report: &mut TickReport) -> Result<(), SimError> {
    let board = world.board();

    for entity in world.query(&[FactKind::Shipment, FactKind::Location], &[FactKind::Route]) {
        let from = world.fact::<Location>(entity)?.tile;
        let to = world.fact::<Shipment>(entity)?.destination;

        let tiles = tile_route(&board, from, to);
        if tiles.is_empty() {
            report.routes_unreachable += 1;
            log::warn!(
                "Shipment {:?} has no route from tile {} to tile {}",
                entity,
                from,
                to
            );
        } else {
            report.routes_planned += 1;
        }
        world.attach(entity, Route::new(tiles))?;
    }

    Ok(())
}
