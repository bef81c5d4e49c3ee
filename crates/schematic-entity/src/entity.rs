//! Base entity state shared by every concrete kind

use crate::capabilities::Capability;
use crate::entity_like::{Connectivity, EntityLike, Record};
use crate::export::{apply_rules, predicates, ExportRule};
use schematic_catalog::{
    expect_attribute, value_type_name, Attributes, EntityPrototype, PrototypeCatalog,
};
use schematic_core::{CollisionBox, ParentRef, Position, Result, SchematicError, WarningSink};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const DEFAULT_COLLISION_MASK: [&str; 4] =
    ["item-layer", "object-layer", "player-layer", "water-tile"];

const BASE_EXPORTS: &[ExportRule] = &[
    ExportRule::new("name", predicates::always),
    ExportRule::new("position", predicates::always),
    ExportRule::new("tags", predicates::non_empty),
];

/// What a capability needs while validating its attributes
pub struct Context<'a> {
    pub catalog: &'a PrototypeCatalog,
    /// Kind name used in diagnostics, e.g. `MiningDrill`
    pub kind: &'static str,
    pub warnings: &'a mut dyn WarningSink,
}

impl<'a> Context<'a> {
    pub fn new(
        catalog: &'a PrototypeCatalog,
        kind: &'static str,
        warnings: &'a mut dyn WarningSink,
    ) -> Self {
        Self {
            catalog,
            kind,
            warnings,
        }
    }
}

/// Identity, placement and tags of a single concrete entity
#[derive(Debug, Clone)]
pub struct Entity {
    catalog: Arc<PrototypeCatalog>,
    prototype: EntityPrototype,
    id: Option<String>,
    position: Position,
    tags: Map<String, Value>,
    parent: Option<ParentRef>,
}

impl Entity {
    /// Resolve the name against `allowed` and take the base attributes
    /// (`name`, `position`, `tile_position`, `id`, `tags`) out of `attrs`.
    ///
    /// With no name given, an attribute named `name` is used, then the
    /// first allowed name. A `name` attribute that disagrees with the given
    /// name is an error.
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        kind: &str,
        allowed: &[&str],
        name: Option<&str>,
        attrs: &mut Attributes,
    ) -> Result<Self> {
        let from_attrs = attrs.take_as::<String>("name")?;
        let name = match (name, from_attrs) {
            (Some(given), Some(attribute)) if given != attribute => {
                return Err(SchematicError::ConflictingName {
                    given: given.to_string(),
                    attribute,
                });
            }
            (Some(given), _) => given.to_string(),
            (None, Some(attribute)) => attribute,
            (None, None) => allowed
                .first()
                .map(|n| n.to_string())
                .ok_or_else(|| {
                    SchematicError::CatalogError(format!("no prototypes for {}", kind))
                })?,
        };

        if !allowed.contains(&name.as_str()) {
            return Err(SchematicError::InvalidEntityName {
                kind: kind.to_string(),
                name,
            });
        }

        let prototype = catalog
            .entity(&name)
            .cloned()
            .ok_or_else(|| SchematicError::UnknownEntity(name.clone()))?;

        let mut entity = Self {
            catalog: Arc::clone(catalog),
            position: Position::ZERO,
            prototype,
            id: None,
            tags: Map::new(),
            parent: None,
        };
        entity.set_tile_position(0, 0);
        entity.absorb(attrs)?;
        Ok(entity)
    }

    /// Take the base attributes present in `attrs`, leaving the rest
    pub fn absorb(&mut self, attrs: &mut Attributes) -> Result<()> {
        // Assigned by the exporter; accepted so exported records load back quietly.
        attrs.take("entity_number");

        if let Some(value) = attrs.take("tile_position") {
            if !value.is_null() {
                let tile = parse_position("tile_position", &value)?;
                self.set_tile_position(tile.x.floor() as i64, tile.y.floor() as i64);
            }
        }
        if let Some(value) = attrs.take("position") {
            if !value.is_null() {
                self.position = parse_position("position", &value)?;
            }
        }
        if let Some(value) = attrs.take("id") {
            self.id = expect_attribute("id", &value)?;
        }
        if let Some(value) = attrs.take("tags") {
            self.tags = expect_attribute("tags", &value)?.unwrap_or_default();
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Arc<PrototypeCatalog> {
        &self.catalog
    }

    pub fn prototype(&self) -> &EntityPrototype {
        &self.prototype
    }

    pub fn name(&self) -> &str {
        &self.prototype.name
    }

    pub fn entity_type(&self) -> &str {
        &self.prototype.entity_type
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Top-left tile of the footprint
    pub fn tile_position(&self) -> (i64, i64) {
        let (half_w, half_h) = self.half_extent();
        (
            (self.position.x - half_w).round() as i64,
            (self.position.y - half_h).round() as i64,
        )
    }

    /// Place the footprint's top-left corner on a tile
    pub fn set_tile_position(&mut self, x: i64, y: i64) {
        let (half_w, half_h) = self.half_extent();
        self.position = Position::new(x as f64 + half_w, y as f64 + half_h);
    }

    pub fn tags(&self) -> &Map<String, Value> {
        &self.tags
    }

    pub fn parent(&self) -> Option<ParentRef> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ParentRef>) {
        self.parent = parent;
    }

    fn half_extent(&self) -> (f64, f64) {
        (
            self.prototype.tile_width as f64 / 2.0,
            self.prototype.tile_height as f64 / 2.0,
        )
    }

    fn write_fields(&self, out: &mut Record) {
        out.insert("name".to_string(), json!(self.prototype.name));
        out.insert(
            "position".to_string(),
            json!({ "x": self.position.x, "y": self.position.y }),
        );
        out.insert("tags".to_string(), Value::Object(self.tags.clone()));
    }
}

/// Read a position given as `{"x": .., "y": ..}` or `[x, y]`
pub fn parse_position(field: &str, value: &Value) -> Result<Position> {
    let coords = match value {
        Value::Object(map) => (map.get("x"), map.get("y")),
        Value::Array(items) if items.len() == 2 => (items.first(), items.get(1)),
        _ => (None, None),
    };
    match coords {
        (Some(x), Some(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Position::new(x, y)),
            _ => Err(SchematicError::field_type(field, "a position", value_type_name(x))),
        },
        _ => Err(SchematicError::field_type(
            field,
            "a dict with 'x' and 'y' or a pair of numbers",
            value_type_name(value),
        )),
    }
}

/// A concrete entity kind: a base entity plus an ordered capability list.
///
/// Implementing this trait is enough to get `EntityLike`, attribute
/// assignment and export.
pub trait EntityKind: Sized + 'static {
    /// Name used in diagnostics, e.g. `MiningDrill`
    const KIND: &'static str;

    const CONNECTIVITY: Connectivity;

    fn base(&self) -> &Entity;

    fn base_mut(&mut self) -> &mut Entity;

    /// Capabilities in construction order
    fn capabilities(&self) -> Vec<&dyn Capability>;

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability>;

    /// Collision layers; the prototype's mask unless a kind overrides it
    fn collision_layers(&self) -> Vec<String> {
        match &self.base().prototype().collision_mask {
            Some(mask) => mask.clone(),
            None => DEFAULT_COLLISION_MASK.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Hook run by `EntityLike::on_insert`
    fn inserted(&mut self) {}

    /// Hook run by `EntityLike::on_remove`
    fn removed(&mut self) {}

    /// Feed `attrs` through every capability in order
    fn absorb_attributes(
        &mut self,
        attrs: &mut Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<()> {
        let catalog = Arc::clone(self.base().catalog());
        let mut cx = Context::new(&catalog, Self::KIND, warnings);
        for capability in self.capabilities_mut() {
            capability.absorb(attrs, &mut cx)?;
        }
        Ok(())
    }

    /// Assign one attribute by its exported key, validating it the same way
    /// construction does. Unknown keys produce a warning.
    fn set_attribute(
        &mut self,
        key: &str,
        value: Value,
        warnings: &mut dyn WarningSink,
    ) -> Result<()> {
        if key == "name" {
            return Err(SchematicError::field_type(
                "name",
                "fixed after construction",
                value_type_name(&value),
            ));
        }
        let mut attrs = Attributes::new().with(key, value);
        self.base_mut().absorb(&mut attrs)?;
        self.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(())
    }

    /// Current values of every field, exported or not
    fn fields(&self) -> Record {
        let mut fields = Record::new();
        self.base().write_fields(&mut fields);
        for capability in self.capabilities() {
            capability.write_fields(&mut fields);
        }
        fields
    }

    /// Exported record; predicates are evaluated on every call
    fn export(&self) -> Record {
        let fields = self.fields();
        let mut out = Record::new();
        apply_rules(&fields, BASE_EXPORTS, &mut out);
        for capability in self.capabilities() {
            apply_rules(&fields, capability.export_rules(), &mut out);
        }
        out
    }
}

impl<T: EntityKind> EntityLike for T {
    fn name(&self) -> &str {
        self.base().name()
    }

    fn entity_type(&self) -> &str {
        self.base().entity_type()
    }

    fn id(&self) -> Option<&str> {
        self.base().id()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.base_mut().set_id(id);
    }

    fn tile_width(&self) -> u32 {
        self.base().prototype().tile_width
    }

    fn tile_height(&self) -> u32 {
        self.base().prototype().tile_height
    }

    fn position(&self) -> Position {
        self.base().position()
    }

    fn collision_box(&self) -> Option<CollisionBox> {
        self.base().prototype().collision_box
    }

    fn collision_mask(&self) -> Vec<String> {
        self.collision_layers()
    }

    fn connectivity(&self) -> Connectivity {
        T::CONNECTIVITY
    }

    fn parent(&self) -> Option<ParentRef> {
        self.base().parent()
    }

    fn set_parent(&mut self, parent: Option<ParentRef>) {
        self.base_mut().set_parent(parent);
    }

    fn on_insert(&mut self) {
        self.inserted();
    }

    fn on_remove(&mut self) {
        self.removed();
    }

    fn to_record(&self) -> Option<Record> {
        Some(self.export())
    }
}
