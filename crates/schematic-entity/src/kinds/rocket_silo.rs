//! Rocket silos

use crate::capabilities::{AutoLaunch, Capability};
use crate::entity::{Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_core::{Result, WarningSink};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RocketSilo {
    base: Entity,
    auto_launch: AutoLaunch,
}

impl RocketSilo {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_of("rocket-silo");
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;

        let mut silo = Self {
            base,
            auto_launch: AutoLaunch::default(),
        };
        silo.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(silo)
    }

    pub fn auto_launch(&self) -> Option<bool> {
        self.auto_launch.auto_launch()
    }

    pub fn set_auto_launch(&mut self, auto_launch: Option<bool>) {
        self.auto_launch.set_auto_launch(auto_launch);
    }
}

impl EntityKind for RocketSilo {
    const KIND: &'static str = "RocketSilo";

    const CONNECTIVITY: Connectivity = Connectivity::NONE;

    fn base(&self) -> &Entity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Entity {
        &mut self.base
    }

    fn capabilities(&self) -> Vec<&dyn Capability> {
        vec![&self.auto_launch]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![&mut self.auto_launch]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_like::EntityLike;
    use schematic_core::{SchematicError, Warning};
    use serde_json::json;

    fn silo() -> RocketSilo {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        RocketSilo::new(&catalog, None, Attributes::new(), &mut warnings).unwrap()
    }

    #[test]
    fn test_auto_launch_false_is_exported() {
        let mut silo = silo();
        assert!(!silo.export().contains_key("auto_launch"));

        silo.set_auto_launch(Some(false));
        assert_eq!(silo.export().get("auto_launch"), Some(&json!(false)));

        silo.set_auto_launch(None);
        assert!(!silo.export().contains_key("auto_launch"));
    }

    #[test]
    fn test_auto_launch_type_checked() {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        let attrs = Attributes::new().with("auto_launch", "yes");
        assert!(matches!(
            RocketSilo::new(&catalog, None, attrs, &mut warnings),
            Err(SchematicError::InvalidFieldType { field, .. }) if field == "auto_launch"
        ));
    }

    #[test]
    fn test_silo_geometry() {
        let silo = silo();
        assert_eq!((silo.tile_width(), silo.tile_height()), (9, 9));
        assert_eq!(silo.position().x, 4.5);
    }
}
