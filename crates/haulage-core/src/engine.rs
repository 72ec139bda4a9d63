//! Simulation engine - main entry point for running the simulation

use haulage_logic::WorldSize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::generation::{initialize_world, populate};
use crate::store::World;
use crate::systems::{run_pipeline, TickReport};

/// Run the six-stage pipeline once over `world`.
///
/// `dt` is accepted for symmetry with other drivers; every rate in the
/// simulation is already per tick.
pub fn advance_tick(world: &mut World, _dt: f32) -> Result<TickReport, SimError> {
    run_pipeline(world)
}

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing all entities
    world: World,
    /// Ticks completed so far
    tick: u64,
}

/// Totals over a multi-tick run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub totals: TickReport,
}

/// Serializable overview of the world at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u32,
    pub height: u32,
    pub settlements: usize,
    pub farms: usize,
    pub shipments: usize,
    pub population: u64,
    pub food_on_tiles: u64,
    pub food_in_transit: u64,
}

impl SimulationEngine {
    /// Create an engine over a fresh, empty world
    pub fn new(size: WorldSize) -> Self {
        Self::from_world(initialize_world(size))
    }

    /// Wrap an existing world
    pub fn from_world(world: World) -> Self {
        Self { world, tick: 0 }
    }

    /// Build a world from a configuration and scatter farms and settlements
    /// over it using the configured seed.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        let config = config.clone().validated()?;
        let mut engine = Self::new(config.world_size);
        let mut rng = StdRng::seed_from_u64(config.seed);
        populate(&mut engine.world, &config, &mut rng);
        Ok(engine)
    }

    /// Advance the simulation by one tick
    pub fn advance_tick(&mut self, dt: f32) -> Result<TickReport, SimError> {
        let report = advance_tick(&mut self.world, dt)?;
        self.tick += 1;
        log::debug!("Tick {}: {:?}", self.tick, report);
        Ok(report)
    }

    /// Advance `ticks` times with a constant timestep
    pub fn run(&mut self, ticks: u32, dt: f32) -> Result<RunSummary, SimError> {
        let mut summary = RunSummary::default();
        for _ in 0..ticks {
            let report = self.advance_tick(dt)?;
            summary.totals.absorb(&report);
            summary.ticks += 1;
        }
        log::info!(
            "Ran {} ticks: {} shipments created, {} delivered, {} people lost",
            summary.ticks,
            summary.totals.shipments_created,
            summary.totals.shipments_delivered,
            summary.totals.population_lost
        );
        Ok(summary)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Count settlements
    pub fn settlement_count(&self) -> usize {
        self.world.count(&[FactKind::Population], &[])
    }

    /// Count farms
    pub fn farm_count(&self) -> usize {
        self.world.count(&[FactKind::FoodProducer], &[])
    }

    /// Count shipments in transit
    pub fn shipment_count(&self) -> usize {
        self.world.count(&[FactKind::Shipment], &[])
    }

    /// Total headcount over all settlements
    pub fn total_population(&self) -> u64 {
        self.sum_of::<Population>(FactKind::Population, |p| p.count)
    }

    /// Food sitting in tile stockpiles
    pub fn food_on_tiles(&self) -> u64 {
        self.world
            .query(&[FactKind::Tile, FactKind::FoodStore], &[])
            .into_iter()
            .filter_map(|e| self.world.fact::<FoodStore>(e).ok())
            .map(|s| s.amount as u64)
            .sum()
    }

    /// Food loaded on shipments
    pub fn food_in_transit(&self) -> u64 {
        self.world
            .query(&[FactKind::Shipment, FactKind::FoodStore], &[])
            .into_iter()
            .filter_map(|e| self.world.fact::<FoodStore>(e).ok())
            .map(|s| s.amount as u64)
            .sum()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let board = self.world.board();
        WorldSnapshot {
            tick: self.tick,
            width: board.width,
            height: board.height,
            settlements: self.settlement_count(),
            farms: self.farm_count(),
            shipments: self.shipment_count(),
            population: self.total_population(),
            food_on_tiles: self.food_on_tiles(),
            food_in_transit: self.food_in_transit(),
        }
    }

    fn sum_of<F: Fact + Copy>(&self, kind: FactKind, value: impl Fn(F) -> u32) -> u64 {
        self.world
            .query(&[kind], &[])
            .into_iter()
            .filter_map(|e| self.world.fact::<F>(e).ok())
            .map(|f| value(f) as u64)
            .sum()
    }
}
