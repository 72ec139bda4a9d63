//! Systems - logic that operates on facts
//!
//! One module per pipeline stage. [`run_pipeline`] runs them in their fixed
//! order; each stage finishes before the next starts.

mod population;
mod production;
mod consumption;
mod shipments;
mod routing;
mod advance;

pub use population::*;
pub use production::*;
pub use consumption::*;
pub use shipments::*;
pub use routing::*;
pub use advance::*;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::store::World;

/// What happened during one tick (or, summed, during a run)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub population_lost: u64,
    pub settlements_abandoned: u64,
    pub food_produced: u64,
    pub food_consumed: u64,
    pub food_unmet: u64,
    pub shipments_created: u64,
    pub food_shipped: u64,
    pub routes_planned: u64,
    pub routes_unreachable: u64,
    pub routes_dropped: u64,
    pub shipments_delivered: u64,
    pub food_delivered: u64,
}

impl TickReport {
    /// Add another report's counters into this one.
    pub fn absorb(&mut self, other: &TickReport) {
        self.population_lost += other.population_lost;
        self.settlements_abandoned += other.settlements_abandoned;
        self.food_produced += other.food_produced;
        self.food_consumed += other.food_consumed;
        self.food_unmet += other.food_unmet;
        self.shipments_created += other.shipments_created;
        self.food_shipped += other.food_shipped;
        self.routes_planned += other.routes_planned;
        self.routes_unreachable += other.routes_unreachable;
        self.routes_dropped += other.routes_dropped;
        self.shipments_delivered += other.shipments_delivered;
        self.food_delivered += other.food_delivered;
    }
}

/// Run all six stages once, in order.
pub fn run_pipeline(world: &mut World) -> Result<TickReport, SimError> {
    let mut report = TickReport::default();

    population_system(world, &mut report)?;
    production_system(world, &mut report)?;
    consumption_system(world, &mut report)?;
    shipment_creation_system(world, &mut report)?;
    route_planning_system(world, &mut report)?;
    shipment_advance_system(world, &mut report)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb() {
        let mut total = TickReport::default();
        let tick = TickReport {
            food_produced: 10,
            shipments_created: 2,
            ..Default::default()
        };
        total.absorb(&tick);
        total.absorb(&tick);
        assert_eq!(total.food_produced, 20);
        assert_eq!(total.shipments_created, 4);
        assert_eq!(total.food_consumed, 0);
    }
}
