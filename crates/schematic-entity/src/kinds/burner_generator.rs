//! Fuel-burning generators

use crate::capabilities::{Capability, Directional};
use crate::entity::{Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_core::{Direction, Result, WarningSink};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BurnerGenerator {
    base: Entity,
    directional: Directional,
}

impl BurnerGenerator {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_of("burner-generator");
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;

        let mut generator = Self {
            base,
            directional: Directional::default(),
        };
        generator.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(generator)
    }

    pub fn direction(&self) -> Direction {
        self.directional.direction()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.directional.set_direction(direction);
    }
}

impl EntityKind for BurnerGenerator {
    const KIND: &'static str = "BurnerGenerator";

    const CONNECTIVITY: Connectivity = Connectivity {
        rotatable: true,
        ..Connectivity::NONE
    };

    fn base(&self) -> &Entity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Entity {
        &mut self.base
    }

    fn capabilities(&self) -> Vec<&dyn Capability> {
        vec![&self.directional]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![&mut self.directional]
    }
}
