//! Error types for CIM to `LinkML` conversion

use crate::uml::{EntityKind, ObjectId};
use thiserror::Error;

/// Closed vocabularies whose values are checked while building or generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// UML connector type
    RelationType,
    /// Slot traversal direction over a relation
    TraversalDirection,
    /// CIM primitive data type name
    PrimitiveType,
    /// Multiplicity token
    Cardinality,
    /// Input record format
    RecordFormat,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RelationType => "relation type",
            Self::TraversalDirection => "traversal direction",
            Self::PrimitiveType => "CIM primitive type",
            Self::Cardinality => "cardinality",
            Self::RecordFormat => "record format",
        };
        f.write_str(name)
    }
}

/// Main error type for CIM to `LinkML` conversion
#[derive(Error, Debug)]
pub enum CimLinkMLError {
    /// By-id index miss, i.e. a dangling reference in the source graph
    #[error("{entity} with object ID {id} not found")]
    NotFound {
        /// Kind of entity looked up
        entity: EntityKind,
        /// Identifier that did not resolve
        id: ObjectId,
    },

    /// By-name resolution returned no class where one is required
    #[error("No class named '{name}' found")]
    ClassNameNotFound {
        /// Class name looked up
        name: String,
    },

    /// Value outside a closed vocabulary
    #[error("Invalid {kind} value '{value}'")]
    InvalidValue {
        /// Vocabulary the value was checked against
        kind: ValueKind,
        /// Offending value
        value: String,
    },

    /// Malformed source data
    #[error("Failed to parse record{}: {message}", display_location(.location))]
    ParseError {
        /// Error message
        message: String,
        /// Record the error occurred in, if known
        location: Option<String>,
    },

    /// Parent links of a package never reach a root
    #[error("Package hierarchy above package {id} contains a cycle")]
    PackageCycle {
        /// Package the walk started from
        id: ObjectId,
    },

    /// None of the requested package schemas could be generated
    #[error("Generation failed for all {failed} selected packages")]
    GenerationFailed {
        /// Number of packages attempted
        failed: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn display_location(location: &Option<String>) -> String {
    location
        .as_ref()
        .map(|location| format!(" ({location})"))
        .unwrap_or_default()
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, CimLinkMLError>;

impl CimLinkMLError {
    /// Create a lookup failure
    #[must_use]
    pub fn not_found(entity: EntityKind, id: ObjectId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a by-name lookup failure
    #[must_use]
    pub fn class_name_not_found(name: impl Into<String>) -> Self {
        Self::ClassNameNotFound { name: name.into() }
    }

    /// Create a closed-vocabulary violation
    #[must_use]
    pub fn invalid_value(kind: ValueKind, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    /// Create a new parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with location
    #[must_use]
    pub fn parse_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Attach a record location to a parse error; other variants pass through
    #[must_use]
    pub fn at(self, location: impl Into<String>) -> Self {
        match self {
            Self::ParseError { message, .. } => Self::ParseError {
                message,
                location: Some(location.into()),
            },
            other => other,
        }
    }

    /// Whether this error is a by-id lookup failure
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for CimLinkMLError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CimLinkMLError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for CimLinkMLError {
    fn from(err: csv::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
            location: err.position().map(|pos| format!("line {}", pos.line())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CimLinkMLError::parse("Invalid date");
        assert!(matches!(err, CimLinkMLError::ParseError { .. }));

        let err = CimLinkMLError::parse("Invalid date").at("package 12");
        match err {
            CimLinkMLError::ParseError { location, .. } => {
                assert_eq!(location.as_deref(), Some("package 12"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = CimLinkMLError::not_found(EntityKind::Class, 42);
        let display = err.to_string();
        assert!(display.contains("Class"));
        assert!(display.contains("42"));
        assert!(err.is_not_found());

        let err = CimLinkMLError::invalid_value(ValueKind::RelationType, "Frobnication");
        assert_eq!(
            err.to_string(),
            "Invalid relation type value 'Frobnication'"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: CimLinkMLError = json_err.into();
        assert!(matches!(err, CimLinkMLError::SerializationError(_)));
    }
}
