//! Electric poles and substations

use crate::capabilities::{Capability, CircuitConnections, PowerConnections};
use crate::entity::{Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_core::{Result, WarningSink};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ElectricPole {
    base: Entity,
    power: PowerConnections,
    circuit: CircuitConnections,
}

impl ElectricPole {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_of("electric-pole");
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;

        let mut pole = Self {
            base,
            power: PowerConnections::default(),
            circuit: CircuitConnections::new(false),
        };
        pole.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(pole)
    }

    pub fn neighbours(&self) -> &[u64] {
        self.power.neighbours()
    }

    pub fn add_neighbour(&mut self, entity_number: u64) {
        self.power.add_neighbour(entity_number);
    }

    pub fn remove_neighbour(&mut self, entity_number: u64) {
        self.power.remove_neighbour(entity_number);
    }

    pub fn connections(&self) -> &CircuitConnections {
        &self.circuit
    }

    pub fn connections_mut(&mut self) -> &mut CircuitConnections {
        &mut self.circuit
    }
}

impl EntityKind for ElectricPole {
    const KIND: &'static str = "ElectricPole";

    const CONNECTIVITY: Connectivity = Connectivity {
        power_connectable: true,
        circuit_connectable: true,
        ..Connectivity::NONE
    };

    fn base(&self) -> &Entity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Entity {
        &mut self.base
    }

    fn capabilities(&self) -> Vec<&dyn Capability> {
        vec![&self.power, &self.circuit]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![&mut self.power, &mut self.circuit]
    }

    /// Wires follow the entity numbers of the export; a pole leaving its
    /// collection drops them.
    fn removed(&mut self) {
        self.power.clear();
        self.circuit.clear();
    }
}
