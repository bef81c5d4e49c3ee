use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, value_type_name, Attributes};
use schematic_core::{Result, SchematicError};
use serde_json::{json, Value};

const EXPORTS: &[ExportRule] = &[ExportRule::new("neighbours", predicates::non_empty)];

/// Copper wire links to other poles, by entity number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerConnections {
    neighbours: Vec<u64>,
}

impl PowerConnections {
    pub fn neighbours(&self) -> &[u64] {
        &self.neighbours
    }

    /// Link to another pole. Linking twice is a no-op.
    pub fn add_neighbour(&mut self, entity_number: u64) {
        if !self.neighbours.contains(&entity_number) {
            self.neighbours.push(entity_number);
        }
    }

    pub fn remove_neighbour(&mut self, entity_number: u64) {
        self.neighbours.retain(|n| *n != entity_number);
    }

    pub fn clear(&mut self) {
        self.neighbours.clear();
    }
}

impl Capability for PowerConnections {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        let Some(value) = attrs.take("neighbours") else {
            return Ok(());
        };
        let items: Vec<Value> = expect_attribute("neighbours", &value)?.unwrap_or_default();

        let mut neighbours = PowerConnections::default();
        for item in &items {
            let number = item.as_u64().filter(|n| *n > 0).ok_or_else(|| {
                SchematicError::field_type(
                    "neighbours",
                    "a list of entity numbers",
                    value_type_name(item),
                )
            })?;
            neighbours.add_neighbour(number);
        }
        *self = neighbours;
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        out.insert("neighbours".to_string(), json!(self.neighbours));
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
