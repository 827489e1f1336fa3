//! Error types for CDD loading

use thiserror::Error;

use crate::xml::XmlError;

/// Errors that can occur while loading or dumping a CDD document
#[derive(Debug, Error)]
pub enum CddError {
    /// Input is not well-formed XML
    #[error("malformed document: {0}")]
    DocumentMalformed(String),

    /// A required element or attribute is missing or misplaced
    #[error("schema violation at {path}: {reason}")]
    SchemaViolation { path: String, reason: String },

    /// A data object references a type id with no declaration
    #[error("unresolved type reference '{dtref}' at {path}")]
    UnresolvedTypeReference { dtref: String, path: String },

    /// Numeric attribute could not be parsed
    #[error("invalid numeric value for attribute '{attribute}' at {path}: '{value}'")]
    NumericParse {
        path: String,
        attribute: String,
        value: String,
    },

    /// Operation is not supported by this format
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl CddError {
    pub(crate) fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CddError::SchemaViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_element(path: &str, name: &str) -> Self {
        Self::schema(path, format!("missing element <{}>", name))
    }

    pub(crate) fn missing_attribute(path: &str, name: &str) -> Self {
        Self::schema(path, format!("missing attribute '{}'", name))
    }
}

impl From<XmlError> for CddError {
    fn from(err: XmlError) -> Self {
        CddError::DocumentMalformed(err.to_string())
    }
}

/// Result type for CDD operations
pub type CddResult<T> = Result<T, CddError>;
