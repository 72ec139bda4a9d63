//! Producer, consumer and population facts.

use serde::{Deserialize, Serialize};

/// Default output of a farm, in food per tick
pub const DEFAULT_FARM_RATE: u32 = 10;

/// Adds food to the tile it stands on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodProducer {
    pub rate: u32,
}

impl FoodProducer {
    pub fn new(rate: u32) -> Self {
        Self { rate }
    }
}

impl Default for FoodProducer {
    fn default() -> Self {
        Self::new(DEFAULT_FARM_RATE)
    }
}

/// Eats from the tile it stands on every tick.
///
/// `unmet_last_tick` is how much of `rate` the local tile could not cover
/// on the most recent consumption pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodConsumer {
    pub rate: u32,
    pub unmet_last_tick: u32,
}

impl FoodConsumer {
    pub fn is_starving(&self) -> bool {
        self.unmet_last_tick > 0
    }
}

/// Headcount of a settlement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub count: u32,
}

impl Population {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    /// Lose one person per unit of unmet demand. Returns the number lost.
    pub fn starve(&mut self, unmet: u32) -> u32 {
        let lost = unmet.min(self.count);
        self.count -= lost;
        lost
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starve() {
        let mut pop = Population::new(10);
        assert_eq!(pop.starve(3), 3);
        assert_eq!(pop.count, 7);
        assert_eq!(pop.starve(20), 7);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_farm_default_rate() {
        assert_eq!(FoodProducer::default().rate, DEFAULT_FARM_RATE);
    }
}
