//! Resource extraction entities

use crate::capabilities::{
    Capability, CircuitConnections, CircuitControl, Comparator, Condition, ControlBehavior,
    Directional, Operand, RequestItems, ResourceReadMode,
};
use crate::entity::{Context, Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, PrototypeCatalog};
use schematic_core::{Direction, Result, WarningSink};
use std::collections::BTreeMap;
use std::sync::Arc;

const CONTROL_MEMBERS: &[&str] = &[
    "circuit_condition",
    "circuit_enable_disable",
    "connect_to_logistic_network",
    "logistic_condition",
    "circuit_read_resources",
    "circuit_resource_read_mode",
];

/// A mining drill (electric, burner, pumpjack)
#[derive(Debug, Clone)]
pub struct MiningDrill {
    base: Entity,
    request_items: RequestItems,
    control: CircuitControl,
    circuit: CircuitConnections,
    directional: Directional,
}

impl MiningDrill {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_of("mining-drill");
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;

        let mut drill = Self {
            base,
            request_items: RequestItems::limited_to(PrototypeCatalog::is_extraction_module),
            control: CircuitControl::new(CONTROL_MEMBERS),
            circuit: CircuitConnections::new(false),
            directional: Directional::default(),
        };
        drill.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(drill)
    }

    pub fn direction(&self) -> Direction {
        self.directional.direction()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.directional.set_direction(direction);
    }

    pub fn item_requests(&self) -> &BTreeMap<String, u32> {
        self.request_items.items()
    }

    /// Request modules for the drill.
    ///
    /// Unknown items fail with `InvalidItem`. Known items that cannot work
    /// in a drill (anything but speed and efficiency modules) are kept but
    /// reported as an `ItemLimitation` warning.
    pub fn set_item_request(
        &mut self,
        item: &str,
        count: u32,
        warnings: &mut dyn WarningSink,
    ) -> Result<()> {
        let catalog = Arc::clone(self.base.catalog());
        let mut cx = Context::new(&catalog, Self::KIND, warnings);
        self.request_items.set_item_request(item, count, &mut cx)
    }

    pub fn remove_item_request(&mut self, item: &str) {
        self.request_items.remove_item_request(item);
    }

    pub fn control_behavior(&self) -> &ControlBehavior {
        self.control.behavior()
    }

    pub fn set_circuit_condition(
        &mut self,
        first: Option<&str>,
        comparator: Comparator,
        second: Operand,
    ) -> Result<()> {
        let condition = Condition::new(self.base.catalog(), first, comparator, second)?;
        self.control.set_circuit_condition(Some(condition));
        Ok(())
    }

    pub fn remove_circuit_condition(&mut self) {
        self.control.set_circuit_condition(None);
    }

    pub fn set_logistic_condition(
        &mut self,
        first: Option<&str>,
        comparator: Comparator,
        second: Operand,
    ) -> Result<()> {
        let condition = Condition::new(self.base.catalog(), first, comparator, second)?;
        self.control.set_logistic_condition(Some(condition));
        Ok(())
    }

    pub fn remove_logistic_condition(&mut self) {
        self.control.set_logistic_condition(None);
    }

    pub fn set_enable_disable(&mut self, value: Option<bool>) {
        self.control.set_enable_disable(value);
    }

    pub fn set_connect_to_logistic_network(&mut self, value: Option<bool>) {
        self.control.set_connect_to_logistic_network(value);
    }

    pub fn set_read_resources(&mut self, value: Option<bool>) {
        self.control.set_read_resources(value);
    }

    pub fn set_read_mode(&mut self, mode: Option<ResourceReadMode>) {
        self.control.set_read_mode(mode);
    }

    pub fn connections(&self) -> &CircuitConnections {
        &self.circuit
    }

    pub fn connections_mut(&mut self) -> &mut CircuitConnections {
        &mut self.circuit
    }
}

impl EntityKind for MiningDrill {
    const KIND: &'static str = "MiningDrill";

    const CONNECTIVITY: Connectivity = Connectivity {
        circuit_connectable: true,
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
        vec![
            &self.request_items,
            &self.control,
            &self.circuit,
            &self.directional,
        ]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![
            &mut self.request_items,
            &mut self.control,
            &mut self.circuit,
            &mut self.directional,
        ]
    }
}
