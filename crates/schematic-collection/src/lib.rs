//! Schematic Collection - Ordered entity containers
//!
//! An [`EntityCollection`] owns its entities, keeps their ids unique, and
//! maintains each entity's back-reference to the slot holding it. A
//! [`Group`] is a collection that is itself placeable and flattens into its
//! children, offset by its own position, on export.

mod collection;
mod group;

pub use collection::EntityCollection;
pub use group::Group;
