use super::Capability;
use crate::entity::Context;
use crate::entity_like::Record;
use crate::export::{predicates, ExportRule};
use schematic_catalog::{expect_attribute, Attributes, PrototypeCatalog, SignalType};
use schematic_core::{Result, SchematicError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const EXPORTS: &[ExportRule] = &[ExportRule::new("control_behavior", predicates::non_empty)];

/// A signal reference as written in blueprints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalId {
    pub name: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
}

impl SignalId {
    /// Look the signal up in the catalog to find its type
    pub fn new(catalog: &PrototypeCatalog, name: &str) -> Result<Self> {
        let signal_type = catalog
            .signal_type(name)
            .ok_or_else(|| SchematicError::InvalidSignal(name.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            signal_type,
        })
    }

    fn validate(&self, catalog: &PrototypeCatalog) -> Result<()> {
        match catalog.signal_type(&self.name) {
            Some(t) if t == self.signal_type => Ok(()),
            _ => Err(SchematicError::InvalidSignal(self.name.clone())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">")]
    Greater,
    #[default]
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "≥")]
    GreaterOrEqual,
    #[serde(rename = "≤")]
    LessOrEqual,
    #[serde(rename = "≠")]
    NotEqual,
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Constant(i32),
    Signal(String),
}

/// `first_signal <comparator> (constant | second_signal)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_signal: Option<SignalId>,
    #[serde(default)]
    pub comparator: Comparator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_signal: Option<SignalId>,
}

impl Condition {
    pub fn new(
        catalog: &PrototypeCatalog,
        first: Option<&str>,
        comparator: Comparator,
        second: Operand,
    ) -> Result<Self> {
        let first_signal = first.map(|name| SignalId::new(catalog, name)).transpose()?;
        let (constant, second_signal) = match second {
            Operand::Constant(value) => (Some(value), None),
            Operand::Signal(name) => (None, Some(SignalId::new(catalog, &name)?)),
        };
        Ok(Self {
            first_signal,
            comparator,
            constant,
            second_signal,
        })
    }

    fn validate(&self, catalog: &PrototypeCatalog) -> Result<()> {
        for signal in self.first_signal.iter().chain(self.second_signal.iter()) {
            signal.validate(catalog)?;
        }
        Ok(())
    }
}

/// Which resources a reading mining drill reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ResourceReadMode {
    #[default]
    ThisMiner,
    EntirePatch,
}

impl From<ResourceReadMode> for u8 {
    fn from(mode: ResourceReadMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for ResourceReadMode {
    type Error = InvalidMode;

    fn try_from(value: u8) -> std::result::Result<Self, InvalidMode> {
        match value {
            0 => Ok(ResourceReadMode::ThisMiner),
            1 => Ok(ResourceReadMode::EntirePatch),
            other => Err(InvalidMode(other)),
        }
    }
}

/// How a logistic container reacts to its circuit network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum LogisticModeOfOperation {
    #[default]
    SendContents,
    SetRequests,
    None,
}

impl From<LogisticModeOfOperation> for u8 {
    fn from(mode: LogisticModeOfOperation) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for LogisticModeOfOperation {
    type Error = InvalidMode;

    fn try_from(value: u8) -> std::result::Result<Self, InvalidMode> {
        match value {
            0 => Ok(LogisticModeOfOperation::SendContents),
            1 => Ok(LogisticModeOfOperation::SetRequests),
            2 => Ok(LogisticModeOfOperation::None),
            other => Err(InvalidMode(other)),
        }
    }
}

/// Out-of-range mode discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMode(pub u8);

impl fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode {}", self.0)
    }
}

/// The `control_behavior` object. Unset members are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlBehavior {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_enable_disable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_to_logistic_network: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logistic_condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_read_resources: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_resource_read_mode: Option<ResourceReadMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit_mode_of_operation: Option<LogisticModeOfOperation>,
}

impl ControlBehavior {
    pub fn is_empty(&self) -> bool {
        *self == ControlBehavior::default()
    }

    fn validate(&self, catalog: &PrototypeCatalog) -> Result<()> {
        for condition in self
            .circuit_condition
            .iter()
            .chain(self.logistic_condition.iter())
        {
            condition.validate(catalog)?;
        }
        Ok(())
    }
}

/// Circuit and logistic network behavior, limited to the members a kind
/// supports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitControl {
    behavior: ControlBehavior,
    supported: &'static [&'static str],
}

impl CircuitControl {
    pub fn new(supported: &'static [&'static str]) -> Self {
        Self {
            behavior: ControlBehavior::default(),
            supported,
        }
    }

    pub fn behavior(&self) -> &ControlBehavior {
        &self.behavior
    }

    /// Replace the whole behavior after checking members and signals
    pub fn set_behavior(
        &mut self,
        behavior: ControlBehavior,
        catalog: &PrototypeCatalog,
    ) -> Result<()> {
        let value = serde_json::to_value(&behavior)?;
        if let Value::Object(map) = &value {
            self.check_supported(map)?;
        }
        behavior.validate(catalog)?;
        self.behavior = behavior;
        Ok(())
    }

    pub fn set_circuit_condition(&mut self, condition: Option<Condition>) {
        self.behavior.circuit_condition = condition;
    }

    pub fn set_logistic_condition(&mut self, condition: Option<Condition>) {
        self.behavior.logistic_condition = condition;
    }

    pub fn set_enable_disable(&mut self, value: Option<bool>) {
        self.behavior.circuit_enable_disable = value;
    }

    pub fn set_connect_to_logistic_network(&mut self, value: Option<bool>) {
        self.behavior.connect_to_logistic_network = value;
    }

    pub fn set_read_resources(&mut self, value: Option<bool>) {
        self.behavior.circuit_read_resources = value;
    }

    pub fn set_read_mode(&mut self, mode: Option<ResourceReadMode>) {
        self.behavior.circuit_resource_read_mode = mode;
    }

    pub fn set_mode_of_operation(&mut self, mode: Option<LogisticModeOfOperation>) {
        self.behavior.circuit_mode_of_operation = mode;
    }

    fn check_supported(&self, raw: &Map<String, Value>) -> Result<()> {
        for key in raw.keys() {
            if !self.supported.contains(&key.as_str()) {
                return Err(SchematicError::field_type(
                    "control_behavior",
                    format!("a dict with keys {:?}", self.supported),
                    format!("unsupported key '{}'", key),
                ));
            }
        }
        Ok(())
    }
}

impl Capability for CircuitControl {
    fn absorb(&mut self, attrs: &mut Attributes, cx: &mut Context<'_>) -> Result<()> {
        let Some(value) = attrs.take("control_behavior") else {
            return Ok(());
        };
        let raw: Map<String, Value> =
            expect_attribute("control_behavior", &value)?.unwrap_or_default();
        self.check_supported(&raw)?;

        let behavior: ControlBehavior =
            serde_json::from_value(Value::Object(raw)).map_err(|e| {
                SchematicError::field_type(
                    "control_behavior",
                    "a control behavior dict",
                    e.to_string(),
                )
            })?;
        behavior.validate(cx.catalog)?;
        self.behavior = behavior;
        Ok(())
    }

    fn write_fields(&self, out: &mut Record) {
        let value = serde_json::to_value(&self.behavior).unwrap_or(Value::Null);
        out.insert("control_behavior".to_string(), value);
    }

    fn export_rules(&self) -> &'static [ExportRule] {
        EXPORTS
    }
}
