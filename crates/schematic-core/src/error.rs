//! Error types for schematic

use thiserror::Error;

/// The main error type for schematic operations
#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("Invalid field type: '{field}' must be {expected}, got {got}")]
    InvalidFieldType {
        field: String,
        expected: String,
        got: String,
    },

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid entity name: '{name}' is not a valid {kind}")]
    InvalidEntityName { kind: String, name: String },

    #[error("Conflicting names: given '{given}' but the 'name' attribute says '{attribute}'")]
    ConflictingName { given: String, attribute: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("Duplicate entity id: {0}")]
    DuplicateId(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity already belongs to a collection: {0}")]
    AlreadyParented(String),

    #[error("Cannot move {0} while it is inside a collection")]
    PositionLocked(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for schematic operations
pub type Result<T> = std::result::Result<T, SchematicError>;

impl SchematicError {
    /// Shorthand for a type mismatch on a named field
    pub fn field_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        SchematicError::InvalidFieldType {
            field: field.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }
}

impl From<toml::de::Error> for SchematicError {
    fn from(err: toml::de::Error) -> Self {
        SchematicError::TomlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for SchematicError {
    fn from(err: serde_json::Error) -> Self {
        SchematicError::JsonError(err.to_string())
    }
}
