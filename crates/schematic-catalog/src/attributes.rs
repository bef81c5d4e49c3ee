//! Typed access to open attribute maps
//!
//! Entity constructors receive a loose JSON object. Each capability takes the
//! keys it owns out of an `Attributes` bag, checking their types as it goes;
//! whatever is still in the bag afterwards is unknown to the entity.

use schematic_core::{Result, SchematicError, Warning, WarningSink};
use serde_json::{Map, Value};

/// A value type that can be read out of an attribute map
pub trait FromAttribute: Sized {
    /// Human-readable description of the accepted type
    const EXPECTED: &'static str;

    fn from_attribute(value: &Value) -> Option<Self>;
}

impl FromAttribute for bool {
    const EXPECTED: &'static str = "a bool or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromAttribute for f64 {
    const EXPECTED: &'static str = "a float or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        // Integers are rejected: fields of this type are floats on disk.
        match value {
            Value::Number(n) if n.is_f64() => n.as_f64(),
            _ => None,
        }
    }
}

impl FromAttribute for i64 {
    const EXPECTED: &'static str = "an int or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromAttribute for u32 {
    const EXPECTED: &'static str = "a non-negative int or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_u64().and_then(|n| u32::try_from(n).ok())
    }
}

impl FromAttribute for String {
    const EXPECTED: &'static str = "a str or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromAttribute for Map<String, Value> {
    const EXPECTED: &'static str = "a dict or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl FromAttribute for Vec<Value> {
    const EXPECTED: &'static str = "a list or null";

    fn from_attribute(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

/// Convert a single value, treating `null` as absent
pub fn expect_attribute<T: FromAttribute>(field: &str, value: &Value) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    T::from_attribute(value)
        .map(Some)
        .ok_or_else(|| SchematicError::field_type(field, T::EXPECTED, value_type_name(value)))
}

/// Owned key-value bag consumed during a single entity construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: Map<String, Value>,
}

impl Attributes {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON value, which must be an object or null
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            Value::Null => Ok(Self::new()),
            other => Err(SchematicError::field_type(
                "attributes",
                "a dict",
                value_type_name(&other),
            )),
        }
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove a raw value. `Some(Value::Null)` means the key was given as null.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Remove and type-check a value.
    ///
    /// Returns `Ok(None)` when the key is absent or null; use `take` to tell
    /// the two apart.
    pub fn take_as<T: FromAttribute>(&mut self, key: &str) -> Result<Option<T>> {
        match self.values.remove(key) {
            Some(value) => expect_attribute(key, &value),
            None => Ok(None),
        }
    }

    /// Consume the bag, emitting one warning per key still present
    pub fn report_unused(self, kind: &str, warnings: &mut dyn WarningSink) {
        for key in self.values.into_iter().map(|(k, _)| k) {
            warnings.warn(Warning::UnknownAttribute {
                kind: kind.to_string(),
                key,
            });
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}

/// Describe a JSON value's type for error messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_take_as_typed() {
        let mut attrs = Attributes::from_value(json!({
            "orientation": 0.25,
            "auto_launch": true,
            "direction": 4,
        }))
        .unwrap();

        assert_eq!(attrs.take_as::<f64>("orientation").unwrap(), Some(0.25));
        assert_eq!(attrs.take_as::<bool>("auto_launch").unwrap(), Some(true));
        assert_eq!(attrs.take_as::<i64>("direction").unwrap(), Some(4));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_null_and_absent_are_none() {
        let mut attrs = Attributes::new().with("bar", Value::Null);
        assert_eq!(attrs.take_as::<u32>("bar").unwrap(), None);
        assert_eq!(attrs.take_as::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let mut attrs = Attributes::new().with("orientation", "north");
        let err = attrs.take_as::<f64>("orientation").unwrap_err();
        match err {
            SchematicError::InvalidFieldType {
                field,
                expected,
                got,
            } => {
                assert_eq!(field, "orientation");
                assert_eq!(expected, "a float or null");
                assert_eq!(got, "str");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integer_is_not_a_float() {
        let mut attrs = Attributes::new().with("orientation", 1);
        assert!(matches!(
            attrs.take_as::<f64>("orientation"),
            Err(SchematicError::InvalidFieldType { .. })
        ));
    }

    #[test]
    fn test_report_unused() {
        let attrs = Attributes::new().with("zeta", 1).with("alpha", 2);
        let mut warnings: Vec<Warning> = Vec::new();
        attrs.report_unused("RocketSilo", &mut warnings);

        assert_eq!(
            warnings,
            vec![
                Warning::UnknownAttribute {
                    kind: "RocketSilo".to_string(),
                    key: "alpha".to_string(),
                },
                Warning::UnknownAttribute {
                    kind: "RocketSilo".to_string(),
                    key: "zeta".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(Attributes::from_value(json!([1, 2])).is_err());
        assert!(Attributes::from_value(Value::Null).unwrap().is_empty());
    }
}
