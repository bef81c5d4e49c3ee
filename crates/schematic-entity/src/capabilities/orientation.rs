use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes};
use schematic_core::{Result, SchematicError};
use serde_json::{json, Value};

const EXPORTS: &[ExportRule] = &[ExportRule::new("orientation", predicates::nonzero)];

/// Free rotation used by rolling stock, as a fraction of a full turn.
///
/// `0.0` is north and `0.25` east. Distinct from `Directional`, which snaps
/// to eight grid directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    orientation: Option<f64>,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            orientation: Some(0.0),
        }
    }
}

impl Orientation {
    pub fn orientation(&self) -> Option<f64> {
        self.orientation
    }

    /// Set the orientation; values must lie within `[0.0, 1.0]`.
    pub fn set_orientation(&mut self, orientation: Option<f64>) -> Result<()> {
        if let Some(value) = orientation {
            if !(0.0..=1.0).contains(&value) {
                return Err(SchematicError::ValueOutOfRange {
                    field: "orientation".to_string(),
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        self.orientation = orientation;
        Ok(())
    }
}

impl Capability for Orientation {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        if let Some(value) = attrs.take("orientation") {
            self.set_orientation(expect_attribute("orientation", &value)?)?;
        }
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        let value = self.orientation.map(|o| json!(o)).unwrap_or(Value::Null);
        out.insert("orientation".to_string(), value);
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
