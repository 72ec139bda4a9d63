//! Fact (component) definitions for the ECS simulation.
//!
//! Facts are pure data structs attached to entities. They have no
//! behavior - that lives in systems. The set of fact kinds is closed:
//! every fact type implements [`Fact`] and names its [`FactKind`].

mod common;
mod economy;
mod transport;

pub use common::*;
pub use economy::*;
pub use transport::*;

use haulage_logic::Board;
use serde::{Deserialize, Serialize};

/// Every kind of fact an entity can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactKind {
    Tile,
    Location,
    FoodProducer,
    FoodConsumer,
    FoodStore,
    Population,
    Shipment,
    Route,
    Board,
}

impl FactKind {
    /// Whether the entity behind `entity` carries a fact of this kind.
    pub(crate) fn present_on(self, entity: &hecs::EntityRef<'_>) -> bool {
        match self {
            FactKind::Tile => entity.has::<Tile>(),
            FactKind::Location => entity.has::<Location>(),
            FactKind::FoodProducer => entity.has::<FoodProducer>(),
            FactKind::FoodConsumer => entity.has::<FoodConsumer>(),
            FactKind::FoodStore => entity.has::<FoodStore>(),
            FactKind::Population => entity.has::<Population>(),
            FactKind::Shipment => entity.has::<Shipment>(),
            FactKind::Route => entity.has::<Route>(),
            FactKind::Board => entity.has::<Board>(),
        }
    }
}

impl std::fmt::Display for FactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A component type belonging to the closed fact set.
pub trait Fact: hecs::Component + sealed::Sealed {
    const KIND: FactKind;
}

macro_rules! impl_fact {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Fact for $ty {
                const KIND: FactKind = FactKind::$kind;
            }
        )*
    };
}

impl_fact! {
    Tile => Tile,
    Location => Location,
    FoodProducer => FoodProducer,
    FoodConsumer => FoodConsumer,
    FoodStore => FoodStore,
    Population => Population,
    Shipment => Shipment,
    Route => Route,
    Board => Board,
}
