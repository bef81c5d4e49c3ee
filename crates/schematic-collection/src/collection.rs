//! EntityCollection - owned entities with unique ids and parent tracking

use crate::group::Group;
use schematic_core::{CollectionId, ParentRef, Result, SchematicError};
use schematic_entity::{AsEntityLike, EntityLike, Record, Resolved};
use serde_json::json;
use std::collections::HashSet;

/// An ordered list of entities.
///
/// The collection is the only writer of its members' `parent`: every slot
/// change rewrites the affected back-references.
pub struct EntityCollection {
    id: CollectionId,
    entities: Vec<Box<dyn EntityLike>>,
}

impl Default for EntityCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCollection {
    pub fn new() -> Self {
        Self {
            id: CollectionId::new(),
            entities: Vec::new(),
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Add an entity at the end, returning its index
    pub fn append(&mut self, entity: Box<dyn EntityLike>) -> Result<usize> {
        let index = self.entities.len();
        self.insert(index, entity)?;
        Ok(index)
    }

    /// Add an entity at `index`, shifting later entities back.
    ///
    /// Fails if the entity still belongs to a collection or its id is taken.
    pub fn insert(&mut self, index: usize, mut entity: Box<dyn EntityLike>) -> Result<()> {
        if index > self.entities.len() {
            return Err(SchematicError::EntityNotFound(format!("index {}", index)));
        }
        if entity.parent().is_some() {
            return Err(SchematicError::AlreadyParented(describe(&*entity)));
        }
        if let Some(id) = entity.id() {
            if self.index_of(id).is_some() {
                return Err(SchematicError::DuplicateId(id.to_string()));
            }
        }

        entity.set_parent(Some(ParentRef::new(self.id, index)));
        self.entities.insert(index, entity);
        self.reindex_from(index + 1);

        let entity = &mut self.entities[index];
        entity.on_insert();

        tracing::debug!(
            collection = %self.id,
            index,
            name = entity.name(),
            "entity inserted"
        );
        Ok(())
    }

    /// Take the entity at `index` out of the collection
    pub fn remove(&mut self, index: usize) -> Result<Box<dyn EntityLike>> {
        let entity = self
            .entities
            .get_mut(index)
            .ok_or_else(|| SchematicError::EntityNotFound(format!("index {}", index)))?;
        entity.on_remove();
        entity.set_parent(None);

        let entity = self.entities.remove(index);
        self.reindex_from(index);

        tracing::debug!(
            collection = %self.id,
            index,
            name = entity.name(),
            "entity removed"
        );
        Ok(entity)
    }

    /// Take the entity with the given id out of the collection
    pub fn remove_by_id(&mut self, id: &str) -> Result<Box<dyn EntityLike>> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SchematicError::EntityNotFound(id.to_string()))?;
        self.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&dyn EntityLike> {
        self.entities.get(index).map(|e| &**e)
    }

    /// Entity at `index` as its concrete type
    pub fn get_as<T: EntityLike + 'static>(&self, index: usize) -> Option<&T> {
        self.entities.get(index)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: EntityLike + 'static>(&mut self, index: usize) -> Option<&mut T> {
        self.entities.get_mut(index)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == Some(id))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&dyn EntityLike> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    /// Follow ids through nested groups, e.g. `["left", "drill"]` is the
    /// entity `drill` inside the group `left`.
    pub fn find_path(&self, path: &[&str]) -> Option<&dyn EntityLike> {
        let (first, rest) = path.split_first()?;
        let entity = self.find_by_id(first)?;
        if rest.is_empty() {
            return Some(entity);
        }
        entity
            .as_any()
            .downcast_ref::<Group>()?
            .entities()
            .find_path(rest)
    }

    /// Change the id of the entity at `index`, keeping ids unique
    pub fn set_id(&mut self, index: usize, id: Option<String>) -> Result<()> {
        if index >= self.entities.len() {
            return Err(SchematicError::EntityNotFound(format!("index {}", index)));
        }
        if let Some(new_id) = id.as_deref() {
            if let Some(other) = self.index_of(new_id) {
                if other != index {
                    return Err(SchematicError::DuplicateId(new_id.to_string()));
                }
            }
        }
        self.entities[index].set_id(id);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn EntityLike> + '_ {
        self.entities.iter().map(|e| &**e)
    }

    /// Every concrete entity reachable from this collection, in order
    pub fn resolve(&self) -> Vec<Resolved<'_>> {
        self.entities.iter().flat_map(|e| e.get()).collect()
    }

    /// Export every concrete entity, numbering them from 1 in order.
    ///
    /// Positions of entities found inside groups are shifted by the group
    /// offsets; the entities themselves are not modified.
    pub fn to_records(&self) -> Result<Vec<Record>> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if let Some(id) = entity.id() {
                if !seen.insert(id) {
                    return Err(SchematicError::DuplicateId(id.to_string()));
                }
            }
        }

        let mut records = Vec::new();
        for resolved in self.resolve() {
            if let Some(mut record) = resolved.to_record() {
                record.insert("entity_number".to_string(), json!(records.len() + 1));
                records.push(record);
            }
        }
        Ok(records)
    }

    fn reindex_from(&mut self, start: usize) {
        let id = self.id;
        for (index, entity) in self.entities.iter_mut().enumerate().skip(start) {
            entity.set_parent(Some(ParentRef::new(id, index)));
        }
    }
}

impl std::fmt::Debug for EntityCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCollection")
            .field("id", &self.id)
            .field("entities", &self.iter().map(|e| e.name()).collect::<Vec<_>>())
            .finish()
    }
}

fn describe(entity: &dyn EntityLike) -> String {
    match entity.id() {
        Some(id) => format!("{} '{}'", entity.name(), id),
        None => entity.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematic_catalog::{Attributes, PrototypeCatalog};
    use schematic_core::{Position, Warning};
    use schematic_entity::{new_entity, ElectricPole, EntityKind, MiningDrill};
    use serde_json::Value;
    use std::cell::Cell;
    use std::rc::Rc;

    fn entity(name: &str, attrs: Value) -> Box<dyn EntityLike> {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        new_entity(&catalog, name, Attributes::from_value(attrs).unwrap(), &mut warnings).unwrap()
    }

    /// Records hook calls and the parent seen at each one
    struct Probe {
        id: Option<String>,
        parent: Option<ParentRef>,
        inserted_with: Rc<Cell<Option<Option<ParentRef>>>>,
        removed_with: Rc<Cell<Option<Option<ParentRef>>>>,
    }

    impl EntityLike for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn entity_type(&self) -> &str {
            "probe"
        }

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn set_id(&mut self, id: Option<String>) {
            self.id = id;
        }

        fn tile_width(&self) -> u32 {
            1
        }

        fn tile_height(&self) -> u32 {
            1
        }

        fn position(&self) -> Position {
            Position::ZERO
        }

        fn collision_box(&self) -> Option<schematic_core::CollisionBox> {
            None
        }

        fn parent(&self) -> Option<ParentRef> {
            self.parent
        }

        fn set_parent(&mut self, parent: Option<ParentRef>) {
            self.parent = parent;
        }

        fn on_insert(&mut self) {
            self.inserted_with.set(Some(self.parent));
        }

        fn on_remove(&mut self) {
            self.removed_with.set(Some(self.parent));
        }

        fn to_record(&self) -> Option<Record> {
            None
        }
    }

    #[test]
    fn test_append_sets_parent() {
        let mut collection = EntityCollection::new();
        let index = collection
            .append(entity("small-electric-pole", json!({})))
            .unwrap();

        assert_eq!(index, 0);
        assert_eq!(
            collection.get(0).and_then(|e| e.parent()),
            Some(ParentRef::new(collection.id(), 0))
        );
    }

    #[test]
    fn test_insert_and_remove_reindex() {
        let mut collection = EntityCollection::new();
        collection.append(entity("small-electric-pole", json!({ "id": "a" }))).unwrap();
        collection.append(entity("small-electric-pole", json!({ "id": "c" }))).unwrap();
        collection
            .insert(1, entity("medium-electric-pole", json!({ "id": "b" })))
            .unwrap();

        let ids: Vec<_> = collection.iter().filter_map(|e| e.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(collection.find_by_id("c").and_then(|e| e.parent()).map(|p| p.index), Some(2));

        let removed = collection.remove(0).unwrap();
        assert_eq!(removed.parent(), None);
        assert_eq!(collection.find_by_id("b").and_then(|e| e.parent()).map(|p| p.index), Some(0));
        assert_eq!(collection.find_by_id("c").and_then(|e| e.parent()).map(|p| p.index), Some(1));

        assert!(collection.insert(5, entity("substation", json!({}))).is_err());
        assert!(matches!(collection.remove(9), Err(SchematicError::EntityNotFound(_))));
    }

    #[test]
    fn test_membership_is_exclusive() {
        let mut first = EntityCollection::new();
        let mut second = EntityCollection::new();
        first.append(entity("rocket-silo", json!({}))).unwrap();

        let moved = first.remove(0).unwrap();
        second.append(moved).unwrap();
        assert_eq!(second.get(0).and_then(|e| e.parent()).map(|p| p.collection), Some(second.id()));

        let mut stray = entity("rocket-silo", json!({}));
        stray.set_parent(Some(ParentRef::new(first.id(), 0)));
        assert!(matches!(
            second.append(stray),
            Err(SchematicError::AlreadyParented(_))
        ));
    }

    #[test]
    fn test_unique_ids() {
        let mut collection = EntityCollection::new();
        collection.append(entity("fluid-wagon", json!({ "id": "tank" }))).unwrap();
        collection.append(entity("fluid-wagon", json!({}))).unwrap();

        assert!(matches!(
            collection.append(entity("fluid-wagon", json!({ "id": "tank" }))),
            Err(SchematicError::DuplicateId(_))
        ));
        assert!(matches!(
            collection.set_id(1, Some("tank".to_string())),
            Err(SchematicError::DuplicateId(_))
        ));

        collection.set_id(0, Some("tank".to_string())).unwrap();
        collection.set_id(1, Some("spare".to_string())).unwrap();
        assert_eq!(collection.index_of("spare"), Some(1));

        let removed = collection.remove_by_id("tank").unwrap();
        assert_eq!(removed.id(), Some("tank"));
        assert!(collection.remove_by_id("tank").is_err());
    }

    #[test]
    fn test_hooks_see_parent() {
        let inserted_with = Rc::new(Cell::new(None));
        let removed_with = Rc::new(Cell::new(None));
        let probe = Probe {
            id: None,
            parent: None,
            inserted_with: Rc::clone(&inserted_with),
            removed_with: Rc::clone(&removed_with),
        };

        let mut collection = EntityCollection::new();
        collection.append(Box::new(probe)).unwrap();
        let expected = Some(ParentRef::new(collection.id(), 0));
        assert_eq!(inserted_with.get(), Some(expected));
        assert_eq!(removed_with.get(), None);

        collection.remove(0).unwrap();
        assert_eq!(removed_with.get(), Some(expected));
    }

    #[test]
    fn test_typed_access() {
        let mut collection = EntityCollection::new();
        collection.append(entity("electric-mining-drill", json!({}))).unwrap();
        collection.append(entity("small-electric-pole", json!({}))).unwrap();

        assert!(collection.get_as::<MiningDrill>(0).is_some());
        assert!(collection.get_as::<MiningDrill>(1).is_none());

        collection
            .get_as_mut::<ElectricPole>(1)
            .unwrap()
            .add_neighbour(1);
        assert_eq!(
            collection.get_as::<ElectricPole>(1).map(|p| p.neighbours().to_vec()),
            Some(vec![1])
        );
    }

    #[test]
    fn test_records_are_numbered() {
        let mut collection = EntityCollection::new();
        collection
            .append(entity("small-electric-pole", json!({ "position": [0.5, 0.5] })))
            .unwrap();
        collection
            .append(entity(
                "small-electric-pole",
                json!({ "position": [5.5, 0.5], "neighbours": [1] }),
            ))
            .unwrap();
        collection.append(Box::new(Probe {
            id: None,
            parent: None,
            inserted_with: Rc::new(Cell::new(None)),
            removed_with: Rc::new(Cell::new(None)),
        }))
        .unwrap();

        let records = collection.to_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("entity_number"), Some(&json!(1)));
        assert_eq!(records[1].get("entity_number"), Some(&json!(2)));
        assert_eq!(records[1].get("neighbours"), Some(&json!([1])));
        assert_eq!(collection.to_records().unwrap(), records);
    }

    #[test]
    fn test_records_reject_duplicate_ids() {
        let mut collection = EntityCollection::new();
        collection.append(entity("substation", json!({ "id": "a" }))).unwrap();
        collection.append(entity("substation", json!({ "id": "b" }))).unwrap();

        // Renamed behind the collection's back
        collection
            .get_as_mut::<ElectricPole>(1)
            .unwrap()
            .base_mut()
            .set_id(Some("a".to_string()));
        assert!(matches!(
            collection.to_records(),
            Err(SchematicError::DuplicateId(id)) if id == "a"
        ));
    }
}
