//! Generation - creation of the world and the entities placed on it.

mod world;
mod settlements;

pub use world::*;
pub use settlements::*;
