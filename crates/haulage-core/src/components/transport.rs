//! Facts for goods in transit.

use haulage_logic::TileIndex;
use serde::{Deserialize, Serialize};

/// Marks an entity as a shipment heading for `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub destination: TileIndex,
}

impl Shipment {
    pub fn new(destination: TileIndex) -> Self {
        Self { destination }
    }
}

/// Planned path of a shipment - present only once a path has been computed.
///
/// `tiles[cursor]` is the tile the shipment should currently be on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub tiles: Vec<TileIndex>,
    pub cursor: usize,
}

impl Route {
    pub fn new(tiles: Vec<TileIndex>) -> Self {
        Self { tiles, cursor: 0 }
    }

    /// Tile the cursor points at, if any.
    pub fn current(&self) -> Option<TileIndex> {
        self.tiles.get(self.cursor).copied()
    }

    /// A route is intact when the cursor tile is where the shipment stands
    /// and the route still ends at the shipment's destination. An empty
    /// route is never intact.
    pub fn is_intact(&self, here: TileIndex, destination: TileIndex) -> bool {
        self.current() == Some(here) && self.tiles.last() == Some(&destination)
    }

    /// Move the cursor one step forward and return the tile it now names.
    /// Returns `None`, leaving the cursor alone, at the end of the route.
    pub fn step(&mut self) -> Option<TileIndex> {
        let next = self.tiles.get(self.cursor + 1).copied()?;
        self.cursor += 1;
        Some(next)
    }

    /// Steps left until the end of the route
    pub fn remaining(&self) -> usize {
        self.tiles.len().saturating_sub(self.cursor + 1)
    }
}
