//! Buffer chests: logistic containers that request items and also supply
//! them to other requesters

use crate::capabilities::{
    Capability, CircuitConnections, CircuitControl, ControlBehavior, Inventory,
    LogisticModeOfOperation, RequestFilter, RequestFilters,
};
use crate::entity::{Entity, EntityKind};
use crate::entity_like::Connectivity;
use schematic_catalog::{Attributes, EntityPrototype, PrototypeCatalog};
use schematic_core::{Result, WarningSink};
use std::sync::Arc;

const CONTROL_MEMBERS: &[&str] = &["circuit_mode_of_operation"];

fn is_buffer(prototype: &EntityPrototype) -> bool {
    prototype.entity_type == "logistic-container"
        && prototype.logistic_mode.as_deref() == Some("buffer")
}

#[derive(Debug, Clone)]
pub struct LogisticBufferContainer {
    base: Entity,
    control: CircuitControl,
    circuit: CircuitConnections,
    request_filters: RequestFilters,
    inventory: Inventory,
}

impl LogisticBufferContainer {
    pub fn new(
        catalog: &Arc<PrototypeCatalog>,
        name: Option<&str>,
        mut attrs: Attributes,
        warnings: &mut dyn WarningSink,
    ) -> Result<Self> {
        let allowed = catalog.names_where(is_buffer);
        let base = Entity::new(catalog, Self::KIND, &allowed, name, &mut attrs)?;
        let slots = base.prototype().inventory_size.unwrap_or_default();

        let mut container = Self {
            base,
            control: CircuitControl::new(CONTROL_MEMBERS),
            circuit: CircuitConnections::new(false),
            request_filters: RequestFilters::default(),
            inventory: Inventory::new(slots),
        };
        container.absorb_attributes(&mut attrs, warnings)?;
        attrs.report_unused(Self::KIND, warnings);
        Ok(container)
    }

    pub fn control_behavior(&self) -> &ControlBehavior {
        self.control.behavior()
    }

    pub fn set_mode_of_operation(&mut self, mode: Option<LogisticModeOfOperation>) {
        self.control.set_mode_of_operation(mode);
    }

    pub fn connections(&self) -> &CircuitConnections {
        &self.circuit
    }

    pub fn connections_mut(&mut self) -> &mut CircuitConnections {
        &mut self.circuit
    }

    pub fn request_filters(&self) -> &[RequestFilter] {
        self.request_filters.filters()
    }

    pub fn set_request_filter(&mut self, index: u32, item: Option<&str>, count: u32) -> Result<()> {
        let catalog = Arc::clone(self.base.catalog());
        self.request_filters
            .set_request_filter(&catalog, index, item, count)
    }

    pub fn set_request_filters(&mut self, requests: &[(&str, u32)]) -> Result<()> {
        let catalog = Arc::clone(self.base.catalog());
        self.request_filters.set_request_filters(&catalog, requests)
    }

    pub fn inventory_size(&self) -> u32 {
        self.inventory.size()
    }

    pub fn bar(&self) -> Option<u32> {
        self.inventory.bar()
    }

    pub fn set_bar(&mut self, bar: Option<u32>) -> Result<()> {
        self.inventory.set_bar(bar)
    }
}

impl EntityKind for LogisticBufferContainer {
    const KIND: &'static str = "LogisticBufferContainer";

    const CONNECTIVITY: Connectivity = Connectivity {
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
        vec![
            &self.control,
            &self.circuit,
            &self.request_filters,
            &self.inventory,
        ]
    }

    fn capabilities_mut(&mut self) -> Vec<&mut dyn Capability> {
        vec![
            &mut self.control,
            &mut self.circuit,
            &mut self.request_filters,
            &mut self.inventory,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{WireColor, WireTarget};
    use crate::entity_like::EntityLike;
    use schematic_core::{SchematicError, Warning};
    use serde_json::json;

    fn chest(attrs: serde_json::Value) -> Result<LogisticBufferContainer> {
        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        LogisticBufferContainer::new(&catalog, None, Attributes::from_value(attrs)?, &mut warnings)
    }

    #[test]
    fn test_only_buffer_chests() {
        let chest = chest(json!({})).unwrap();
        assert_eq!(chest.name(), "logistic-chest-buffer");
        assert_eq!(chest.inventory_size(), 48);

        let catalog = PrototypeCatalog::base();
        let mut warnings: Vec<Warning> = Vec::new();
        assert!(matches!(
            LogisticBufferContainer::new(
                &catalog,
                Some("logistic-chest-requester"),
                Attributes::new(),
                &mut warnings
            ),
            Err(SchematicError::InvalidEntityName { .. })
        ));
    }

    #[test]
    fn test_full_record() {
        let chest = chest(json!({
            "bar": 10,
            "request_filters": [
                { "index": 2, "name": "iron-plate", "count": 100 },
                { "index": 1, "name": "copper-plate", "count": 50 },
            ],
            "control_behavior": { "circuit_mode_of_operation": 1 },
            "connections": { "1": { "red": [{ "entity_id": 3 }] } },
        }))
        .unwrap();

        assert_eq!(chest.request_filters()[0].name, "copper-plate");
        assert_eq!(
            serde_json::Value::Object(chest.export()),
            json!({
                "name": "logistic-chest-buffer",
                "position": { "x": 0.5, "y": 0.5 },
                "bar": 10,
                "request_filters": [
                    { "index": 1, "name": "copper-plate", "count": 50 },
                    { "index": 2, "name": "iron-plate", "count": 100 },
                ],
                "control_behavior": { "circuit_mode_of_operation": 1 },
                "connections": { "1": { "red": [{ "entity_id": 3 }] } },
            })
        );
    }

    #[test]
    fn test_bar_bounded_by_inventory() {
        assert!(matches!(
            chest(json!({ "bar": 49 })),
            Err(SchematicError::ValueOutOfRange { .. })
        ));

        let mut chest = chest(json!({ "bar": 0 })).unwrap();
        assert_eq!(chest.export().get("bar"), Some(&json!(0)));
        chest.set_bar(None).unwrap();
        assert!(!chest.export().contains_key("bar"));
    }

    #[test]
    fn test_request_filter_editing() {
        let mut chest = chest(json!({})).unwrap();
        chest
            .set_request_filters(&[("iron-plate", 10), ("steel-plate", 5)])
            .unwrap();
        assert_eq!(chest.request_filters().len(), 2);

        chest.set_request_filter(1, None, 0).unwrap();
        assert_eq!(chest.request_filters().len(), 1);
        assert_eq!(chest.request_filters()[0].index, 2);

        assert!(matches!(
            chest.set_request_filter(3, Some("water"), 1),
            Err(SchematicError::InvalidItem(_))
        ));
        assert!(chest.set_request_filter(0, Some("coal"), 1).is_err());
    }

    #[test]
    fn test_circuit_wires() {
        let mut chest = chest(json!({})).unwrap();
        assert!(!chest.export().contains_key("connections"));

        let target = WireTarget {
            entity_id: 7,
            circuit_id: None,
        };
        chest
            .connections_mut()
            .add_connection(WireColor::Green, 1, target)
            .unwrap();
        assert!(chest
            .connections_mut()
            .add_connection(WireColor::Green, 2, target)
            .is_err());
        assert_eq!(
            chest.export().get("connections"),
            Some(&json!({ "1": { "green": [{ "entity_id": 7 }] } }))
        );

        chest
            .connections_mut()
            .remove_connection(WireColor::Green, 1, target);
        assert!(chest.connections().is_empty());
    }

    #[test]
    fn test_mode_of_operation() {
        let mut chest = chest(json!({})).unwrap();
        chest.set_mode_of_operation(Some(LogisticModeOfOperation::None));
        assert_eq!(
            chest.export().get("control_behavior"),
            Some(&json!({ "circuit_mode_of_operation": 2 }))
        );

        assert!(matches!(
            self::chest(json!({ "control_behavior": { "circuit_condition": {} } })),
            Err(SchematicError::InvalidFieldType { .. })
        ));
    }
}
