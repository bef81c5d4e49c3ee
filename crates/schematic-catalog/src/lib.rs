//! Schematic Catalog - Prototype lookup tables and attribute introspection
//!
//! This crate provides the read-only game data entities are validated
//! against (which names a kind may take, which items and signals exist),
//! plus the typed attribute bag entity constructors consume.

mod attributes;
mod catalog;
mod prototype;

pub use attributes::{expect_attribute, value_type_name, Attributes, FromAttribute};
pub use catalog::PrototypeCatalog;
pub use prototype::{EntityPrototype, ModulePrototype, SignalType};
