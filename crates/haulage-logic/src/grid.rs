//! Pure grid geometry: tile index ↔ (x, y) conversion and tile adjacency.
//!
//! Tiles are numbered row-major: `index = x + y * width`. Conversions that
//! fall outside the board return `None` rather than panicking; callers
//! filter those out before use.

use serde::{Deserialize, Serialize};

/// Linear index of a tile on the board, in `[0, width * height)`.
pub type TileIndex = u32;

/// Sentinel for "no tile". Never a valid index on any board that fits in memory.
pub const NO_TILE: TileIndex = TileIndex::MAX;

/// Preset square board sizes (side length in tiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldSize {
    Small,
    #[default]
    Typical,
    Large,
    VeryLarge,
}

impl WorldSize {
    /// Side length of the square board.
    pub fn side(self) -> u32 {
        match self {
            WorldSize::Small => 32,
            WorldSize::Typical => 128,
            WorldSize::Large => 512,
            WorldSize::VeryLarge => 1024,
        }
    }

    /// Parse a size name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "small" => Some(WorldSize::Small),
            "typical" => Some(WorldSize::Typical),
            "large" => Some(WorldSize::Large),
            "very_large" | "verylarge" | "very-large" => Some(WorldSize::VeryLarge),
            _ => None,
        }
    }
}

/// Terrain classification of a tile. Carried on tiles but not consulted by
/// any stage yet; paths ignore terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    Water,
    #[default]
    Land,
    Mountains,
}

/// Board dimensions and the geometry derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

impl Board {
    /// A `width` by `height` board. Both sides must be non-zero and the tile
    /// count must fit a [`TileIndex`]; see [`Board::try_new`].
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(
            Self::try_new(width, height).is_some(),
            "invalid board {}x{}",
            width,
            height
        );
        Self { width, height }
    }

    /// A board, or `None` if it would have no tiles or more tiles than a
    /// [`TileIndex`] can count.
    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        width.checked_mul(height)?;
        Some(Self { width, height })
    }

    pub fn square(size: WorldSize) -> Self {
        Self::new(size.side(), size.side())
    }

    /// Number of tiles on the board. Saturates for hand-built boards too
    /// large to index.
    pub fn tile_count(&self) -> u32 {
        self.width.checked_mul(self.height).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, index: TileIndex) -> bool {
        index < self.tile_count()
    }

    /// Grid position of a tile index: `(index mod width, index div width)`.
    pub fn position_of(&self, index: TileIndex) -> (i32, i32) {
        ((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Tile index of a grid position, or `None` when off the board.
    pub fn index_of(&self, x: i32, y: i32) -> Option<TileIndex> {
        if x < 0 || x >= self.width as i32 {
            return None;
        }
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        Some(x as u32 + y as u32 * self.width)
    }

    /// Tiles reachable in one step from `index`.
    ///
    /// The adjacency is deliberately lopsided: west, north-west, east and
    /// south-east. Straight north and south are not neighbors. Routes are
    /// chains of this relation, so it must stay exactly as is.
    pub fn neighbors(&self, index: TileIndex) -> Vec<TileIndex> {
        let (x, y) = self.position_of(index);
        [(x - 1, y), (x - 1, y - 1), (x + 1, y), (x + 1, y + 1)]
            .into_iter()
            .filter_map(|(nx, ny)| self.index_of(nx, ny))
            .collect()
    }

    /// Euclidean distance between the grid positions of two tiles.
    pub fn distance(&self, a: TileIndex, b: TileIndex) -> f64 {
        let (x0, y0) = self.position_of(a);
        let (x1, y1) = self.position_of(b);
        let dx = (x0 - x1) as f64;
        let dy = (y0 - y1) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}
