//! Prototype definitions

use schematic_core::CollisionBox;
use serde::{Deserialize, Serialize};

/// The category a signal belongs to, as written in blueprint signal ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Item,
    Fluid,
    Virtual,
}

/// Static data for one placeable entity prototype
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPrototype {
    pub name: String,
    /// Prototype type tag, e.g. `mining-drill`
    pub entity_type: String,
    pub collision_box: Option<CollisionBox>,
    pub collision_mask: Option<Vec<String>>,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Slot count for entities with an inventory
    pub inventory_size: Option<u32>,
    /// Logistic network role for logistic containers (`buffer`, `requester`, ...)
    pub logistic_mode: Option<String>,
}

/// Static data for a module item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePrototype {
    pub name: String,
    /// Whether the module can be used by resource-extraction entities
    #[serde(default)]
    pub extraction: bool,
}

/// TOML file format for prototype catalogs
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub entity: Vec<EntityPrototypeDefinition>,
    #[serde(default)]
    pub items: NameList,
    #[serde(default)]
    pub fluids: NameList,
    #[serde(default)]
    pub signals: SignalList,
    #[serde(default)]
    pub module: Vec<ModulePrototype>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NameList {
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SignalList {
    #[serde(default, rename = "virtual")]
    pub virtual_signals: Vec<String>,
}

/// Entity prototype as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntityPrototypeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub collision_box: Option<[[f64; 2]; 2]>,
    #[serde(default)]
    pub collision_mask: Option<Vec<String>>,
    #[serde(default)]
    pub tile_width: Option<u32>,
    #[serde(default)]
    pub tile_height: Option<u32>,
    #[serde(default)]
    pub inventory_size: Option<u32>,
    #[serde(default)]
    pub logistic_mode: Option<String>,
}

impl EntityPrototypeDefinition {
    /// Resolve the footprint: explicit tile sizes win, otherwise derive them
    /// from the collision box, falling back to a single tile.
    pub fn to_entity_prototype(self) -> EntityPrototype {
        let collision_box = self.collision_box.map(CollisionBox::from_corners);
        let (box_width, box_height) = collision_box
            .map(|b| b.tile_dimensions())
            .unwrap_or((1, 1));

        EntityPrototype {
            name: self.name,
            entity_type: self.entity_type,
            collision_box,
            collision_mask: self.collision_mask,
            tile_width: self.tile_width.unwrap_or(box_width),
            tile_height: self.tile_height.unwrap_or(box_height),
            inventory_size: self.inventory_size,
            logistic_mode: self.logistic_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_from_collision_box() {
        let def: EntityPrototypeDefinition = toml::from_str(
            r#"
            name = "electric-mining-drill"
            type = "mining-drill"
            collision_box = [[-1.4, -1.4], [1.4, 1.4]]
            "#,
        )
        .unwrap();

        let proto = def.to_entity_prototype();
        assert_eq!(proto.tile_width, 3);
        assert_eq!(proto.tile_height, 3);
    }

    #[test]
    fn test_explicit_footprint_wins() {
        let def: EntityPrototypeDefinition = toml::from_str(
            r#"
            name = "wide-drill"
            type = "mining-drill"
            collision_box = [[-1.2, -1.2], [1.2, 1.2]]
            tile_width = 4
            tile_height = 4
            "#,
        )
        .unwrap();

        let proto = def.to_entity_prototype();
        assert_eq!((proto.tile_width, proto.tile_height), (4, 4));
    }

    #[test]
    fn test_missing_collision_box_is_one_tile() {
        let def: EntityPrototypeDefinition = toml::from_str(
            r#"
            name = "marker"
            type = "simple-entity"
            "#,
        )
        .unwrap();

        let proto = def.to_entity_prototype();
        assert_eq!((proto.tile_width, proto.tile_height), (1, 1));
        assert!(proto.collision_box.is_none());
    }
}
