//! Error types for dap-constraints

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Constraint error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A dataset node is missing a required field or has a malformed one
    Structural,
    /// A requested index lies outside a dimension's declared size
    OutOfBounds,
    /// A projection structure could not be allocated
    Allocation,
    /// Failure surfaced unchanged from the cache node builder
    Delegated,
    /// Configuration errors
    Config,
    /// Node handle does not resolve in the dataset tree
    NotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::OutOfBounds => "out_of_bounds",
            ErrorKind::Allocation => "allocation",
            ErrorKind::Delegated => "delegated",
            ErrorKind::Config => "config",
            ErrorKind::NotFound => "not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraint error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct ConstraintError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl ConstraintError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Structural, message)
    }

    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutOfBounds, message)
    }

    pub fn allocation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Allocation, message)
    }

    /// Error raised by a cache node builder implementation
    pub fn delegated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Delegated, message)
    }

    pub fn node_not_found(node: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("Dataset node not found: {}", node),
        )
    }
}

impl From<std::collections::TryReserveError> for ConstraintError {
    fn from(err: std::collections::TryReserveError) -> Self {
        ConstraintError::allocation(format!("Reservation failed: {}", err)).with_source(err)
    }
}

impl From<ConfigError> for ConstraintError {
    fn from(err: ConfigError) -> Self {
        ConstraintError::new(ErrorKind::Config, err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ConstraintError>;
