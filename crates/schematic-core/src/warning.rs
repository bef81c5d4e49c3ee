//! Non-fatal diagnostics
//!
//! Warnings never stop an operation; they are handed to a `WarningSink`
//! chosen by the caller. Collect them with a `Vec<Warning>`, or forward them
//! to the log with `LogSink`.

use std::fmt;

/// A non-fatal diagnostic raised while building or editing an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An input key no capability of the entity recognized
    UnknownAttribute { kind: String, key: String },
    /// A known item that this entity cannot actually hold
    ItemLimitation { kind: String, item: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownAttribute { kind, key } => {
                write!(f, "{} has no attribute '{}'", kind, key)
            }
            Warning::ItemLimitation { kind, item } => {
                write!(f, "Item '{}' cannot be placed in {}", item, kind)
            }
        }
    }
}

/// Destination for warnings
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Sink that forwards every warning to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::UnknownAttribute { kind, key } => {
                tracing::warn!(kind = %kind, key = %key, "{}", warning)
            }
            Warning::ItemLimitation { kind, item } => {
                tracing::warn!(kind = %kind, item = %item, "{}", warning)
            }
        }
    }
}
