//! Error types for cadshape

use std::io;
use thiserror::Error;

/// Main error type for cadshape operations
#[derive(Debug, Error)]
pub enum ShapeError {
    /// IO error occurred while reading or writing a record
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Raw JSON text could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entity name is not present in the shape registry
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Persisted kind tag does not name a constructible shape
    #[error("Unknown shape kind: {0}")]
    UnknownShapeKind(i32),

    /// A required CAD-JSON field is absent
    #[error("{entity}: missing required field '{field}'")]
    MissingField { entity: String, field: String },

    /// A CAD-JSON field is present but has the wrong type or value
    #[error("{entity}: invalid field '{field}', expected {expected}")]
    InvalidField {
        entity: String,
        field: String,
        expected: &'static str,
    },

    /// Layer color index outside its defined encodings
    #[error("Invalid layer color index: {0}")]
    InvalidColorIndex(i32),

    /// A name-keyed table already holds an entry with this name
    #[error("Entry '{name}' already exists in {table} table")]
    DuplicateEntry { table: &'static str, name: String },

    /// Record version this reader does not understand
    #[error("Unsupported record version: {0}")]
    UnsupportedVersion(u32),

    /// Malformed persisted record
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl ShapeError {
    /// Build a `MissingField` error
    pub fn missing(entity: impl Into<String>, field: impl Into<String>) -> Self {
        ShapeError::MissingField {
            entity: entity.into(),
            field: field.into(),
        }
    }

    /// Build an `InvalidField` error
    pub fn invalid(
        entity: impl Into<String>,
        field: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        ShapeError::InvalidField {
            entity: entity.into(),
            field: field.into(),
            expected,
        }
    }

    /// True for errors confined to a single CAD-JSON entity, which an
    /// importer may skip without abandoning the whole drawing.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShapeError::NotFound(_)
                | ShapeError::MissingField { .. }
                | ShapeError::InvalidField { .. }
                | ShapeError::InvalidColorIndex(_)
        )
    }
}

/// Result type alias for cadshape operations
pub type Result<T> = std::result::Result<T, ShapeError>;

impl From<String> for ShapeError {
    fn from(s: String) -> Self {
        ShapeError::Custom(s)
    }
}

impl From<&str> for ShapeError {
    fn from(s: &str) -> Self {
        ShapeError::Custom(s.to_string())
    }
}
