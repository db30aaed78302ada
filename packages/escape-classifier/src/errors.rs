//! Error types for escape-classifier
//!
//! Provides unified error handling across the crate.

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Kind of named entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ConcreteType,
    Interface,
    Function,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::ConcreteType => "concrete type",
            EntityKind::Interface => "interface",
            EntityKind::Function => "function",
        };
        f.write_str(s)
    }
}

/// Main error type for escape classification
#[derive(Debug, Error)]
pub enum EscapeError {
    /// A lookup referenced an identity the catalog never registered
    #[error("Unknown {kind} '{name}'")]
    UnknownType { kind: EntityKind, name: String },

    /// A function body is inconsistent (detected while building it)
    #[error("Malformed function '{function}': {reason}")]
    MalformedFunction { function: String, reason: String },

    /// Whole-program well-formedness violation (detected before classification)
    #[error("Ill-formed program: {reason}")]
    IllFormedProgram { reason: String },

    /// A name was registered twice
    #[error("Duplicate {kind} '{name}'")]
    DuplicateDefinition { kind: EntityKind, name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Program description / expectation file error
    #[error("Harness error: {0}")]
    Harness(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EscapeError {
    /// Unknown concrete type
    pub fn unknown_type(name: impl Into<String>) -> Self {
        EscapeError::UnknownType {
            kind: EntityKind::ConcreteType,
            name: name.into(),
        }
    }

    /// Unknown interface
    pub fn unknown_interface(name: impl Into<String>) -> Self {
        EscapeError::UnknownType {
            kind: EntityKind::Interface,
            name: name.into(),
        }
    }

    /// Malformed function
    pub fn malformed(function: impl Into<String>, reason: impl Into<String>) -> Self {
        EscapeError::MalformedFunction {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Ill-formed program
    pub fn ill_formed(reason: impl Into<String>) -> Self {
        EscapeError::IllFormedProgram {
            reason: reason.into(),
        }
    }

    /// Duplicate definition
    pub fn duplicate(kind: EntityKind, name: impl Into<String>) -> Self {
        EscapeError::DuplicateDefinition {
            kind,
            name: name.into(),
        }
    }

    /// Harness error
    pub fn harness(msg: impl Into<String>) -> Self {
        EscapeError::Harness(msg.into())
    }
}

/// Result type alias for escape classification
pub type Result<T> = std::result::Result<T, EscapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EscapeError::unknown_type("Reader").to_string(),
            "Unknown concrete type 'Reader'"
        );
        assert_eq!(
            EscapeError::unknown_interface("io.Reader").to_string(),
            "Unknown interface 'io.Reader'"
        );
        assert_eq!(
            EscapeError::malformed("New", "body is empty").to_string(),
            "Malformed function 'New': body is empty"
        );
        assert_eq!(
            EscapeError::duplicate(EntityKind::Function, "main").to_string(),
            "Duplicate function 'main'"
        );
    }

    #[test]
    fn test_config_error_converts() {
        fn load() -> Result<()> {
            Err(ConfigError::MissingVersion)?;
            Ok(())
        }
        assert!(matches!(load(), Err(EscapeError::Config(_))));
    }
}
