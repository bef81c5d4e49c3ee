//! Prototype catalog for loading and querying game data

use crate::prototype::{CatalogFile, EntityPrototype, ModulePrototype, SignalType};
use schematic_core::{Result, SchematicError};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const BASE_CATALOG: &str = include_str!("../data/base.toml");

static BASE: OnceLock<Arc<PrototypeCatalog>> = OnceLock::new();

/// Registry of every prototype entities can be validated against
#[derive(Debug, Default, Clone)]
pub struct PrototypeCatalog {
    /// Entity prototypes in load order
    entities: Vec<EntityPrototype>,
    /// Entity name -> index into `entities`
    entity_index: HashMap<String, usize>,
    items: HashSet<String>,
    fluids: HashSet<String>,
    virtual_signals: HashSet<String>,
    modules: HashMap<String, ModulePrototype>,
}

impl PrototypeCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled catalog, parsed once and shared
    pub fn base() -> Arc<Self> {
        BASE.get_or_init(|| {
            let mut catalog = Self::new();
            catalog
                .load_string(BASE_CATALOG)
                .expect("bundled catalog must parse");
            Arc::new(catalog)
        })
        .clone()
    }

    /// Load a single file, or every `*.toml` file of a directory in name order
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return self.load_file(path);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.extension().map(|e| e == "toml").unwrap_or(false) {
                files.push(file_path);
            }
        }
        files.sort();

        for file in files {
            self.load_file(&file)?;
        }
        Ok(())
    }

    /// Load a catalog from a TOML file
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading catalog file");
        self.load_string(&content)
    }

    /// Load a catalog from a TOML string, merging it into this one
    pub fn load_string(&mut self, content: &str) -> Result<()> {
        let file: CatalogFile = toml::from_str(content)?;

        for def in file.entity {
            if def.name.is_empty() {
                return Err(SchematicError::CatalogError(
                    "entity prototype without a name".to_string(),
                ));
            }
            self.register_entity(def.to_entity_prototype());
        }

        self.items.extend(file.items.names);
        self.fluids.extend(file.fluids.names);
        self.virtual_signals.extend(file.signals.virtual_signals);

        for module in file.module {
            self.register_module(module);
        }

        Ok(())
    }

    /// Register an entity prototype directly, replacing one with the same name
    pub fn register_entity(&mut self, prototype: EntityPrototype) {
        match self.entity_index.get(&prototype.name) {
            Some(&index) => self.entities[index] = prototype,
            None => {
                self.entity_index
                    .insert(prototype.name.clone(), self.entities.len());
                self.entities.push(prototype);
            }
        }
    }

    /// Register a module; its name also becomes a known item
    pub fn register_module(&mut self, module: ModulePrototype) {
        self.items.insert(module.name.clone());
        self.modules.insert(module.name.clone(), module);
    }

    /// Get an entity prototype by name
    pub fn entity(&self, name: &str) -> Option<&EntityPrototype> {
        self.entity_index.get(name).map(|&i| &self.entities[i])
    }

    /// Names of every prototype of the given type, in catalog order
    pub fn names_of(&self, entity_type: &str) -> Vec<&str> {
        self.names_where(|p| p.entity_type == entity_type)
    }

    /// Names of every prototype matching a predicate, in catalog order
    pub fn names_where(&self, predicate: impl Fn(&EntityPrototype) -> bool) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|p| predicate(p))
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn is_item(&self, name: &str) -> bool {
        self.items.contains(name)
    }

    /// Whether a resource-extraction entity may hold this item
    pub fn is_extraction_module(&self, name: &str) -> bool {
        self.modules.get(name).map(|m| m.extraction).unwrap_or(false)
    }

    /// Classify a signal name, or `None` if no signal has that name
    pub fn signal_type(&self, name: &str) -> Option<SignalType> {
        if self.items.contains(name) {
            Some(SignalType::Item)
        } else if self.fluids.contains(name) {
            Some(SignalType::Fluid)
        } else if self.virtual_signals.contains(name) {
            Some(SignalType::Virtual)
        } else {
            None
        }
    }
}
