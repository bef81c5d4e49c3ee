//! Group - a placeable collection of entities

use crate::collection::EntityCollection;
use schematic_core::{CollisionBox, ParentRef, Position, Result, SchematicError};
use schematic_entity::{Connectivity, EntityLike, Record, Resolved};

/// Entities kept together and placed as one unit.
///
/// Children live in group space: their positions are relative to the group
/// and are offset by the group position when the group is resolved. Nested
/// groups accumulate offsets.
#[derive(Debug)]
pub struct Group {
    id: Option<String>,
    name: String,
    group_type: String,
    position: Position,
    parent: Option<ParentRef>,
    /// Union of the children's areas, in group space
    collision_box: Option<CollisionBox>,
    entities: EntityCollection,
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: "group".to_string(),
            group_type: "group".to_string(),
            position: Position::ZERO,
            parent: None,
            collision_box: None,
            entities: EntityCollection::new(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_type(&mut self, group_type: impl Into<String>) {
        self.group_type = group_type.into();
    }

    /// Move the group origin. Not allowed while the group sits in a
    /// collection.
    pub fn set_position(&mut self, position: Position) -> Result<()> {
        if self.parent.is_some() {
            return Err(SchematicError::PositionLocked(format!(
                "group '{}'",
                self.id.as_deref().unwrap_or_default()
            )));
        }
        self.position = position;
        Ok(())
    }

    pub fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    pub fn append(&mut self, entity: Box<dyn EntityLike>) -> Result<usize> {
        let index = self.entities.append(entity)?;
        self.recalculate_area();
        Ok(index)
    }

    pub fn insert(&mut self, index: usize, entity: Box<dyn EntityLike>) -> Result<()> {
        self.entities.insert(index, entity)?;
        self.recalculate_area();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Box<dyn EntityLike>> {
        let entity = self.entities.remove(index)?;
        self.recalculate_area();
        Ok(entity)
    }

    /// Mutable access to a child. Call [`Group::recalculate_area`] after
    /// moving it.
    pub fn get_as_mut<T: EntityLike + 'static>(&mut self, index: usize) -> Option<&mut T> {
        self.entities.get_as_mut(index)
    }

    /// Recompute the bounding box from the current children
    pub fn recalculate_area(&mut self) {
        self.collision_box = self
            .entities
            .iter()
            .map(area_of)
            .reduce(|acc, area| acc.union(&area));
    }
}

fn area_of(entity: &dyn EntityLike) -> CollisionBox {
    entity
        .collision_box()
        .unwrap_or_default()
        .offset(entity.position())
}

impl EntityLike for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn entity_type(&self) -> &str {
        &self.group_type
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn tile_width(&self) -> u32 {
        self.collision_box.map_or(0, |b| b.tile_dimensions().0)
    }

    fn tile_height(&self) -> u32 {
        self.collision_box.map_or(0, |b| b.tile_dimensions().1)
    }

    fn position(&self) -> Position {
        self.position
    }

    fn collision_box(&self) -> Option<CollisionBox> {
        self.collision_box
    }

    fn connectivity(&self) -> Connectivity {
        Connectivity {
            rotatable: true,
            double_grid_aligned: self.entities.iter().any(|e| e.double_grid_aligned()),
            ..Connectivity::NONE
        }
    }

    fn parent(&self) -> Option<ParentRef> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<ParentRef>) {
        self.parent = parent;
    }

    fn get(&self) -> Vec<Resolved<'_>> {
        self.entities
            .iter()
            .flat_map(|e| e.get())
            .map(|resolved| resolved.offset_by(self.position))
            .collect()
    }

    fn to_record(&self) -> Option<Record> {
        None
    }
}
