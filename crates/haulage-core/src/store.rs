//! World store - entities, their facts, and the tile position index.
//!
//! Wraps a `hecs::World` with the board singleton and a tile lookup table.
//! [`World::query`] hands back an owned snapshot of entity ids, so a stage
//! can create and destroy entities or attach and detach facts while it
//! walks the result. Touching an entity destroyed earlier in the walk
//! yields [`StoreError::NoSuchEntity`].

use haulage_logic::{Board, TileIndex};
use hecs::{DynamicBundle, Entity};

use crate::components::{Fact, FactKind, FoodStore, Location, Tile};
use crate::error::StoreError;

/// All entities of one simulation plus the indexes over them.
pub struct World {
    inner: hecs::World,
    board: Board,
    board_entity: Entity,
    /// tile index -> tile entity. Tiles are never destroyed.
    tiles: Vec<Entity>,
}

impl World {
    /// Create the board singleton and one tile entity per cell.
    pub fn new(board: Board) -> Self {
        let mut inner = hecs::World::new();
        let board_entity = inner.spawn((board,));

        let count = board.tile_count();
        let mut tiles = Vec::with_capacity(count as usize);
        for index in 0..count {
            tiles.push(inner.spawn((Tile::default(), Location::new(index), FoodStore::default())));
        }

        log::info!(
            "Initialized {}x{} board with {} tiles",
            board.width,
            board.height,
            count
        );

        Self {
            inner,
            board,
            board_entity,
            tiles,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn board_entity(&self) -> Entity {
        self.board_entity
    }

    /// Create an entity with no facts.
    pub fn create(&mut self) -> Entity {
        self.inner.spawn(())
    }

    /// Create an entity carrying every fact in `bundle`.
    ///
    /// Tiles are created only by [`World::new`]; spawning another `Tile`
    /// leaves it out of the position index.
    pub fn spawn(&mut self, bundle: impl DynamicBundle) -> Entity {
        self.inner.spawn(bundle)
    }

    /// Destroy an entity and every fact on it. Tiles and the board are permanent.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), StoreError> {
        if entity == self.board_entity || self.is_tile(entity) {
            return Err(StoreError::Permanent(entity));
        }
        self.inner
            .despawn(entity)
            .map_err(|_| StoreError::NoSuchEntity(entity))
    }

    /// Attach a fact, replacing any existing fact of the same kind.
    pub fn attach<F: Fact>(&mut self, entity: Entity, fact: F) -> Result<(), StoreError> {
        self.inner
            .insert_one(entity, fact)
            .map_err(|_| StoreError::NoSuchEntity(entity))
    }

    /// Remove a fact and hand it back.
    pub fn detach<F: Fact>(&mut self, entity: Entity) -> Result<F, StoreError> {
        self.inner
            .remove_one::<F>(entity)
            .map_err(|e| StoreError::from_component(entity, F::KIND, e))
    }

    pub fn get<F: Fact>(&self, entity: Entity) -> Result<hecs::Ref<'_, F>, StoreError> {
        self.inner
            .get::<&F>(entity)
            .map_err(|e| StoreError::from_component(entity, F::KIND, e))
    }

    pub fn get_mut<F: Fact>(&mut self, entity: Entity) -> Result<&mut F, StoreError> {
        self.inner
            .query_one_mut::<&mut F>(entity)
            .map_err(|e| StoreError::from_query_one(entity, F::KIND, e))
    }

    /// Copy a fact out of the store.
    pub fn fact<F: Fact + Copy>(&self, entity: Entity) -> Result<F, StoreError> {
        self.get::<F>(entity).map(|f| *f)
    }

    pub fn has(&self, entity: Entity, kind: FactKind) -> Result<bool, StoreError> {
        self.inner
            .entity(entity)
            .map(|e| kind.present_on(&e))
            .map_err(|_| StoreError::NoSuchEntity(entity))
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live entities, tiles and board included
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Entities carrying every `required` kind and none of the `excluded`
    /// kinds, as an owned snapshot taken now.
    pub fn query(&self, required: &[FactKind], excluded: &[FactKind]) -> Vec<Entity> {
        self.inner
            .iter()
            .filter(|e| {
                required.iter().all(|k| k.present_on(e)) && !excluded.iter().any(|k| k.present_on(e))
            })
            .map(|e| e.entity())
            .collect()
    }

    /// Number of entities matching a query pattern.
    pub fn count(&self, required: &[FactKind], excluded: &[FactKind]) -> usize {
        self.inner
            .iter()
            .filter(|e| {
                required.iter().all(|k| k.present_on(e)) && !excluded.iter().any(|k| k.present_on(e))
            })
            .count()
    }

    /// The tile entity at `index`.
    pub fn tile_at(&self, index: TileIndex) -> Option<Entity> {
        self.tiles.get(index as usize).copied()
    }

    /// The tile entity under a located entity.
    pub fn tile_under(&self, entity: Entity) -> Result<Entity, StoreError> {
        let index = self.fact::<Location>(entity)?.tile;
        self.tile_at(index).ok_or(StoreError::NoTileAt(index))
    }

    /// Every located entity at `index`: the tile plus any settlements,
    /// farms and shipments standing on it.
    pub fn entities_at(&self, index: TileIndex) -> Vec<Entity> {
        self.inner
            .query::<&Location>()
            .iter()
            .filter(|(_, loc)| loc.tile == index)
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Euclidean grid distance between two located entities, or `f64::MAX`
    /// when either has no location.
    pub fn distance(&self, a: Entity, b: Entity) -> f64 {
        match (self.fact::<Location>(a), self.fact::<Location>(b)) {
            (Ok(la), Ok(lb)) => self.board.distance(la.tile, lb.tile),
            _ => f64::MAX,
        }
    }

    fn is_tile(&self, entity: Entity) -> bool {
        match self.fact::<Location>(entity) {
            Ok(loc) => self.tile_at(loc.tile) == Some(entity),
            Err(_) => false,
        }
    }
}
