//! Error types for Velum query operations.

use alloc::string::String;
use core::fmt;

/// Result type alias for Velum operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for query composition and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operand documented as callable is not callable. Raised at
    /// composition time, before any data is touched.
    NotCallable {
        operator: String,
    },
    /// A path-expression string could not be compiled.
    PathSyntax {
        message: String,
        position: usize,
    },
    /// An array-only operator was asked to produce a remote-query
    /// representation of itself. Raised at translation time, never during
    /// local execution.
    NotSupported {
        operator: String,
    },
    /// A bulk-generation helper was asked for a negative element count.
    InvalidRange {
        count: i64,
    },
    /// Invalid operation, e.g. composing past a terminal operator.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotCallable { operator } => {
                write!(f, "Operator {}: key or selector is not callable", operator)
            }
            Error::PathSyntax { message, position } => {
                write!(f, "Path expression error at {}: {}", position, message)
            }
            Error::NotSupported { operator } => {
                write!(
                    f,
                    "Operator {} runs locally only and has no remote representation",
                    operator
                )
            }
            Error::InvalidRange { count } => {
                write!(f, "Invalid element count: {}", count)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a not-callable error for the given operator.
    pub fn not_callable(operator: impl Into<String>) -> Self {
        Error::NotCallable {
            operator: operator.into(),
        }
    }

    /// Creates a path syntax error.
    pub fn path_syntax(message: impl Into<String>, position: usize) -> Self {
        Error::PathSyntax {
            message: message.into(),
            position,
        }
    }

    /// Creates a not-supported error for the given operator.
    pub fn not_supported(operator: impl Into<String>) -> Self {
        Error::NotSupported {
            operator: operator.into(),
        }
    }

    /// Creates an invalid range error.
    pub fn invalid_range(count: i64) -> Self {
        Error::InvalidRange { count }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}
