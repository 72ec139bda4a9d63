//! Error types for the world store and the simulation pipeline.

use haulage_logic::TileIndex;
use hecs::Entity;
use thiserror::Error;

use crate::components::FactKind;
use crate::config::LoadError;

/// Failures surfaced by [`crate::store::World`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entity {0:?} no longer exists")]
    NoSuchEntity(Entity),
    #[error("entity {entity:?} has no {kind} fact")]
    MissingFact { entity: Entity, kind: FactKind },
    #[error("no tile entity at index {0}")]
    NoTileAt(TileIndex),
    #[error("entity {0:?} is permanent and cannot be destroyed")]
    Permanent(Entity),
}

impl StoreError {
    pub(crate) fn from_component(entity: Entity, kind: FactKind, err: hecs::ComponentError) -> Self {
        match err {
            hecs::ComponentError::NoSuchEntity => StoreError::NoSuchEntity(entity),
            hecs::ComponentError::MissingComponent(_) => StoreError::MissingFact { entity, kind },
        }
    }

    pub(crate) fn from_query_one(entity: Entity, kind: FactKind, err: hecs::QueryOneError) -> Self {
        match err {
            hecs::QueryOneError::NoSuchEntity => StoreError::NoSuchEntity(entity),
            hecs::QueryOneError::Unsatisfied => StoreError::MissingFact { entity, kind },
        }
    }
}

/// Failures surfaced by the tick pipeline and the engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid configuration: {0}")]
    Config(#[from] LoadError),
}
