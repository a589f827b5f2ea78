//! Property error types

use thiserror::Error;

/// Errors raised by the property schema layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// A type name that is not part of the closed property type set
    #[error("Unknown property type: {0}")]
    UnknownType(String),

    /// A property name that is not declared in the schema being written to
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// A property declared twice in the same scope
    #[error("Duplicate property: {0}")]
    DuplicateProperty(String),

    /// A value whose type does not match the declared type
    #[error("Type mismatch for property '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Text that cannot be parsed as the requested type
    #[error("Cannot parse '{text}' as {expected}")]
    Parse { expected: &'static str, text: String },

    /// A well-typed value that the receiver rejects
    #[error("Invalid value for property '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

/// Result type for property operations
pub type Result<T> = std::result::Result<T, PropertyError>;
