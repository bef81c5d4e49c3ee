//! Schematic Entity - Typed blueprint entities
//!
//! Every placeable object implements [`EntityLike`]. Concrete kinds are
//! built from a base [`Entity`] plus a fixed list of capabilities, each of
//! which owns some attributes, validates them, and decides when they appear
//! in the exported record.

pub mod capabilities;
mod entity;
mod entity_like;
mod export;
pub mod kinds;

pub use capabilities::Capability;
pub use entity::{parse_position, Context, Entity, EntityKind};
pub use entity_like::{AsEntityLike, Connectivity, EntityLike, Record, Resolved};
pub use export::{predicates, ExportPredicate, ExportRule};
pub use kinds::{
    kind_of, new_entity, BurnerGenerator, ElectricPole, FluidWagon, LogisticBufferContainer,
    MiningDrill, RocketSilo,
};
