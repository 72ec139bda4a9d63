//! Facts shared by several entity types: tiles, placement and stockpiles.

use haulage_logic::{Terrain, TileIndex};
use serde::{Deserialize, Serialize};

/// Marks an entity as a grid cell. One per tile index, never destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Not consulted by any stage yet
    pub terrain: Terrain,
}

/// Where an entity sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub tile: TileIndex,
}

impl Location {
    pub fn new(tile: TileIndex) -> Self {
        Self { tile }
    }
}

/// Food stockpile. Held by tiles, and by shipments as cargo in transit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodStore {
    pub amount: u32,
}

impl FoodStore {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }

    /// Take up to `wanted` from the store. Returns how much was taken.
    pub fn withdraw(&mut self, wanted: u32) -> u32 {
        let taken = wanted.min(self.amount);
        self.amount -= taken;
        taken
    }

    pub fn deposit(&mut self, amount: u32) {
        self.amount = self.amount.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdraw_clamps_at_zero() {
        let mut store = FoodStore::new(3);
        assert_eq!(store.withdraw(5), 3);
        assert_eq!(store.amount, 0);
        assert_eq!(store.withdraw(1), 0);
    }

    #[test]
    fn test_withdraw_partial() {
        let mut store = FoodStore::new(10);
        assert_eq!(store.withdraw(4), 4);
        assert_eq!(store.amount, 6);
        store.deposit(2);
        assert_eq!(store.amount, 8);
    }
}
