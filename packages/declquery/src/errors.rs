//! Error types for declquery
//!
//! Provides unified error handling across the crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for declquery operations
#[derive(Debug, Error)]
pub enum DeclQueryError {
    /// Bad or missing source root, invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Per-file parse failure (recovered by the store, surfaced by the parser port)
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A query ran against a released store
    #[error("Tree store has been released and can no longer be queried")]
    UseAfterRelease,

    /// A pipeline operation was declared for a different element kind
    #[error("Type mismatch: operation expects '{found}' but the pipeline element is '{expected}'")]
    TypeMismatch { expected: String, found: String },

    /// A projection produced a node that is not a recognized declaration of the target kind
    #[error("Projection error: {message} (source: {node})")]
    ProjectionType { node: String, message: String },

    /// A sort key could not be ordered
    #[error("Sort key error: {message} (node: {node})")]
    SortKey { node: String, message: String },

    /// A required scalar result was absent
    #[error("No '{element}' declaration matched the query")]
    NoMatch { element: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeclQueryError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        DeclQueryError::Configuration(msg.into())
    }

    /// Create a parse error for a file
    pub fn parse(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        DeclQueryError::Parse {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        DeclQueryError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn projection(node: impl Into<String>, msg: impl Into<String>) -> Self {
        DeclQueryError::ProjectionType {
            node: node.into(),
            message: msg.into(),
        }
    }

    pub fn sort_key(node: impl Into<String>, msg: impl Into<String>) -> Self {
        DeclQueryError::SortKey {
            node: node.into(),
            message: msg.into(),
        }
    }

    pub fn no_match(element: impl ToString) -> Self {
        DeclQueryError::NoMatch {
            element: element.to_string(),
        }
    }

    /// Whether the error aborts the calling query without retry
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DeclQueryError::Parse { .. })
    }
}

impl From<ConfigError> for DeclQueryError {
    fn from(err: ConfigError) -> Self {
        DeclQueryError::Configuration(err.to_string())
    }
}

/// Result type alias for declquery operations
pub type Result<T> = std::result::Result<T, DeclQueryError>;
