use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes};
use schematic_core::{Result, SchematicError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const EXPORTS: &[ExportRule] = &[ExportRule::new("connections", predicates::non_empty)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireColor {
    Red,
    Green,
}

/// The far end of a circuit wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireTarget {
    pub entity_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_id: Option<u8>,
}

/// Wires attached to one connection point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircuitPoint {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub red: Vec<WireTarget>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub green: Vec<WireTarget>,
}

impl CircuitPoint {
    fn wires_mut(&mut self, color: WireColor) -> &mut Vec<WireTarget> {
        match color {
            WireColor::Red => &mut self.red,
            WireColor::Green => &mut self.green,
        }
    }

    fn is_empty(&self) -> bool {
        self.red.is_empty() && self.green.is_empty()
    }
}

/// Red and green wires, keyed by connection point (`"1"`, and `"2"` for
/// entities with two sides)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitConnections {
    dual: bool,
    points: BTreeMap<String, CircuitPoint>,
}

impl CircuitConnections {
    pub fn new(dual: bool) -> Self {
        Self {
            dual,
            points: BTreeMap::new(),
        }
    }

    pub fn point(&self, point: u8) -> Option<&CircuitPoint> {
        self.points.get(&point.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Attach a wire from `point` to `target`. Duplicate wires are ignored.
    pub fn add_connection(
        &mut self,
        color: WireColor,
        point: u8,
        target: WireTarget,
    ) -> Result<()> {
        self.check_point(point)?;
        let wires = self
            .points
            .entry(point.to_string())
            .or_default()
            .wires_mut(color);
        if !wires.contains(&target) {
            wires.push(target);
        }
        Ok(())
    }

    pub fn remove_connection(&mut self, color: WireColor, point: u8, target: WireTarget) {
        let key = point.to_string();
        if let Some(entry) = self.points.get_mut(&key) {
            entry.wires_mut(color).retain(|t| *t != target);
            if entry.is_empty() {
                self.points.remove(&key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    fn check_point(&self, point: u8) -> Result<()> {
        let max = if self.dual { 2 } else { 1 };
        if point == 0 || point > max {
            return Err(SchematicError::ValueOutOfRange {
                field: "connections".to_string(),
                min: 1.0,
                max: max as f64,
                value: point as f64,
            });
        }
        Ok(())
    }
}

impl Capability for CircuitConnections {
    fn absorb(&mut self, attrs: &mut Attributes, _cx: &mut Context<'_>) -> Result<()> {
        let Some(value) = attrs.take("connections") else {
            return Ok(());
        };
        let raw: Map<String, Value> = expect_attribute("connections", &value)?.unwrap_or_default();

        let mut points: BTreeMap<String, CircuitPoint> = BTreeMap::new();
        for (key, entry) in raw {
            let point: u8 = key.parse().map_err(|_| {
                SchematicError::field_type(
                    "connections",
                    "connection points \"1\" or \"2\"",
                    key.clone(),
                )
            })?;
            self.check_point(point)?;
            let parsed: CircuitPoint = serde_json::from_value(entry).map_err(|e| {
                SchematicError::field_type("connections", "red/green wire lists", e.to_string())
            })?;
            if parsed.is_empty() {
                continue;
            }

            // "01" and "+1" name the same point as "1"
            let slot = points.entry(point.to_string()).or_default();
            for (color, wires) in [
                (WireColor::Red, parsed.red),
                (WireColor::Green, parsed.green),
            ] {
                let existing = slot.wires_mut(color);
                for target in wires {
                    if !existing.contains(&target) {
                        existing.push(target);
                    }
                }
            }
        }
        self.points = points;
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        let mut map = Map::new();
        for (key, point) in &self.points {
            if let Ok(value) = serde_json::to_value(point) {
                map.insert(key.clone(), value);
            }
        }
        out.insert("connections".to_string(), Value::Object(map));
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
