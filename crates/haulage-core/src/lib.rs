//! Haulage Core - Food Economy Simulation Engine
//!
//! A discrete-time simulation of food on a square grid: farms fill their
//! tile's stockpile, settlements eat from theirs, and hungry settlements
//! pull food from distant farms as shipments that walk the grid.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Tiles, settlements, farms, shipments, the board
//! - **Facts**: Pure data attached to entities (Location, FoodStore, Route, etc.)
//! - **Systems**: Six pipeline stages that query and update facts each tick
//!
//! # Example
//!
//! ```rust,no_run
//! use haulage_core::prelude::*;
//!
//! let mut engine = SimulationEngine::from_config(&SimConfig::default()).unwrap();
//!
//! for _ in 0..100 {
//!     engine.advance_tick(1.0).unwrap();
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod store;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{advance_tick, SimulationEngine};
    pub use crate::error::{SimError, StoreError};
    pub use crate::store::World;
    pub use crate::systems::TickReport;
    pub use haulage_logic::{Board, TileIndex, WorldSize};
}
