//! Pure grid and routing logic for Haulage.
//!
//! Nothing in this crate knows about entities or the ECS world. Functions
//! take plain data and return results, so they are unit-testable on their
//! own and shared with the engine.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`grid`] | Board dimensions, tile index ↔ position, neighbor rule, world sizes |
//! | [`pathfinding`] | Generic A* search and the grid tile router built on it |

pub mod grid;
pub mod pathfinding;

pub use grid::{Board, Terrain, TileIndex, WorldSize, NO_TILE};
pub use pathfinding::{tile_route, AStar};
