//! Rolling stock carrying fluids

use crate::capabilities::{Capability, Orientation};
use crate::entity::{Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_core::{Result, WarningSink};
use std::sync::Arc;

/// Layer rolling stock occupies when the prototype does not name one
const TRAIN_LAYER: &str = "train-layer";

#[derive(Debug, Clone)]
pub struct FluidWagon {
    base: Entity,
    orientation: Orientation,
}

impl FluidWagon {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_of("fluid-wagon");
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;

        let mut wagon = Self {
            base,
            orientation: Orientation::default(),
        };
        wagon.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(wagon)
    }

    pub fn orientation(&self) -> Option<f64> {
        self.orientation.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Option<f64>) -> Result<()> {
        self.orientation.set_orientation(orientation)
    }
}

impl EntityKind for FluidWagon {
    const KIND: &'static str = "FluidWagon";

    const CONNECTIVITY: Connectivity = Connectivity::NONE;

    fn base(&self) -> &Entity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Entity {
        &mut self.base
    }

    fn capabilities(&self) -> Vec<&dyn Capability> {
        vec![&self.orientation]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![&mut self.orientation]
    }

    fn collision_layers(&self) -> Vec<String> {
        match &self.base.prototype().collision_mask {
            Some(mask) => mask.clone(),
            None => vec![TRAIN_LAYER.to_string()],
        }
    }
}
