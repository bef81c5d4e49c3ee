//! Conditional field export

use crate::entity_like::Record;
use serde_json::Value;

/// Decides from a field's current value whether it is written out
pub type ExportPredicate = fn(&Value) -> bool;

/// Associates an exported field with its inclusion predicate
#[derive(Clone, Copy)]
pub struct ExportRule {
    pub field: &'static str,
    pub include: ExportPredicate,
}

impl ExportRule {
    pub const fn new(field: &'static str, include: ExportPredicate) -> Self {
        Self { field, include }
    }
}

impl std::fmt::Debug for ExportRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportRule").field("field", &self.field).finish()
    }
}

/// Copy every field of `fields` whose rule currently holds into `out`.
///
/// Fields without a rule are never exported.
pub(crate) fn apply_rules(fields: &Record, rules: &[ExportRule], out: &mut Record) {
    for rule in rules {
        if let Some(value) = fields.get(rule.field) {
            if (rule.include)(value) {
                out.insert(rule.field.to_string(), value.clone());
            }
        }
    }
}

/// Predicates shared by the capabilities
pub mod predicates {
    use serde_json::Value;

    pub fn always(_: &Value) -> bool {
        true
    }

    pub fn not_null(value: &Value) -> bool {
        !value.is_null()
    }

    /// Present and not numerically zero
    pub fn nonzero(value: &Value) -> bool {
        !value.is_null() && value.as_f64() != Some(0.0)
    }

    /// Present and, for containers, holding at least one element
    pub fn non_empty(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}
