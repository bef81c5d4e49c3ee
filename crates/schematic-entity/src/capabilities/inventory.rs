use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes};
use schematic_core::{Result, SchematicError};
use serde_json::{json, Value};

const EXPORTS: &[ExportRule] = &[ExportRule::new("bar", predicates::not_null)];

/// Inventory limit ("bar"): slots at or past the bar stay closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    size: u32,
    bar: Option<u32>,
}

impl Inventory {
    pub fn new(size: u32) -> Self {
        Self { size, bar: None }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn bar(&self) -> Option<u32> {
        self.bar
    }

    pub fn set_bar(&mut self, bar: Option<u32>) -> Result<()> {
        if let Some(value) = bar {
            if value > self.size {
                return Err(SchematicError::ValueOutOfRange {
                    field: "bar".to_string(),
                    min: 0.0,
                    max: self.size as f64,
                    value: value as f64,
                });
            }
        }
        self.bar = bar;
        Ok(())
    }
}

impl Capability for Inventory {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        if let Some(value) = attrs.take("bar") {
            self.set_bar(expect_attribute("bar", &value)?)?;
        }
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        let value = self.bar.map(|b| json!(b)).unwrap_or(Value::Null);
        out.insert("bar".to_string(), value);
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
