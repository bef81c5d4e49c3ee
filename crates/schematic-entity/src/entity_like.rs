//! The contract every placeable object satisfies

use schematic_core::{CollisionBox, ParentRef, Position};
use serde_json::{json, Map, Value};
use std::any::Any;

/// An exported entity: field name -> value, only for fields being exported
pub type Record = Map<String, Value>;

/// Connection and placement flags fixed per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    pub power_connectable: bool,
    pub dual_power_connectable: bool,
    pub circuit_connectable: bool,
    pub dual_circuit_connectable: bool,
    pub double_grid_aligned: bool,
    pub rotatable: bool,
    /// Reported for every kind; no flipping behavior hangs off it.
    pub flippable: bool,
}

impl Connectivity {
    pub const NONE: Self = Self {
        power_connectable: false,
        dual_power_connectable: false,
        circuit_connectable: false,
        dual_circuit_connectable: false,
        double_grid_aligned: false,
        rotatable: false,
        flippable: true,
    };
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::NONE
    }
}

/// Upcasting helpers, implemented for every sized `EntityLike`
pub trait AsEntityLike {
    fn as_entity_like(&self) -> &dyn EntityLike;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: EntityLike + 'static> AsEntityLike for T {
    fn as_entity_like(&self) -> &dyn EntityLike {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything that can be placed in a blueprint.
///
/// Concrete entities export themselves; composites such as groups resolve
/// into the concrete entities they contain through [`EntityLike::get`].
pub trait EntityLike: AsEntityLike {
    fn name(&self) -> &str;

    /// Prototype type tag, e.g. `mining-drill`
    fn entity_type(&self) -> &str;

    /// User label, unique within the owning collection
    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    fn tile_width(&self) -> u32;

    fn tile_height(&self) -> u32;

    fn position(&self) -> Position;

    fn collision_box(&self) -> Option<CollisionBox>;

    fn collision_mask(&self) -> Vec<String> {
        Vec::new()
    }

    fn connectivity(&self) -> Connectivity {
        Connectivity::NONE
    }

    fn power_connectable(&self) -> bool {
        self.connectivity().power_connectable
    }

    fn dual_power_connectable(&self) -> bool {
        self.connectivity().dual_power_connectable
    }

    fn circuit_connectable(&self) -> bool {
        self.connectivity().circuit_connectable
    }

    fn dual_circuit_connectable(&self) -> bool {
        self.connectivity().dual_circuit_connectable
    }

    fn double_grid_aligned(&self) -> bool {
        self.connectivity().double_grid_aligned
    }

    fn rotatable(&self) -> bool {
        self.connectivity().rotatable
    }

    fn flippable(&self) -> bool {
        self.connectivity().flippable
    }

    /// The collection currently holding this entity
    fn parent(&self) -> Option<ParentRef>;

    /// Written by the owning collection only.
    fn set_parent(&mut self, parent: Option<ParentRef>);

    /// Called once after the entity joins a collection.
    fn on_insert(&mut self) {}

    /// Called once before the entity leaves a collection.
    fn on_remove(&mut self) {}

    /// Resolve into the concrete entities that end up in an export.
    fn get(&self) -> Vec<Resolved<'_>> {
        vec![Resolved::new(self.as_entity_like())]
    }

    /// Exported form, or `None` for entities that only exist as composites
    fn to_record(&self) -> Option<Record>;
}

/// A concrete entity reached through [`EntityLike::get`], together with the
/// accumulated offset of the composites it was found in.
#[derive(Clone, Copy)]
pub struct Resolved<'a> {
    pub entity: &'a dyn EntityLike,
    pub offset: Position,
}

impl<'a> Resolved<'a> {
    pub fn new(entity: &'a dyn EntityLike) -> Self {
        Self {
            entity,
            offset: Position::ZERO,
        }
    }

    pub fn offset_by(mut self, by: Position) -> Self {
        self.offset = self.offset + by;
        self
    }

    /// Final position after applying the offset
    pub fn position(&self) -> Position {
        self.entity.position() + self.offset
    }

    /// Export the entity with its position shifted by the offset.
    /// The entity itself is left untouched.
    pub fn to_record(&self) -> Option<Record> {
        let mut record = self.entity.to_record()?;
        if self.offset != Position::ZERO {
            let position = self.position();
            record.insert("position".to_string(), json!({ "x": position.x, "y": position.y }));
        }
        Some(record)
    }
}

impl std::fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("name", &self.entity.name())
            .field("offset", &self.offset)
            .finish()
    }
}
