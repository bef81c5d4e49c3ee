use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes};
use schematic_core::{Direction, Result, SchematicError};
use serde_json::json;

const EXPORTS: &[ExportRule] = &[ExportRule::new("direction", predicates::nonzero)];

/// Grid-aligned facing, one of eight directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directional {
    direction: Direction,
}

impl Directional {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }
}

impl Capability for Directional {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        let Some(value) = attrs.take("direction") else {
            return Ok(());
        };
        self.direction = match expect_attribute::<i64>("direction", &value)? {
            None => Direction::default(),
            Some(index) => Direction::from_index(index).ok_or(SchematicError::ValueOutOfRange {
                field: "direction".to_string(),
                min: 0.0,
                max: 7.0,
                value: index as f64,
            })?,
        };
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        out.insert("direction".to_string(), json!(self.direction.index()));
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
