//! Error types for cotejar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for cotejar operations.
///
/// Provides detailed context about failures including shape mismatches
/// between the `expect` and `got` vectors, missing columns in tabular
/// input, and invalid comparison options.
///
/// # Examples
///
/// ```
/// use cotejar::error::CotejarError;
///
/// let err = CotejarError::DimensionMismatch {
///     expected: "expect len=4".to_string(),
///     actual: "3".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum CotejarError {
    /// Input sequences have incompatible lengths.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Input was empty where at least one element is required.
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// Requested column does not exist in the data frame.
    ColumnNotFound {
        /// Column name that was looked up
        name: String,
    },

    /// Invalid comparison option value provided.
    InvalidOption {
        /// Option name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for CotejarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CotejarError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            CotejarError::EmptyInput { context } => {
                write!(f, "empty input: {context}")
            }
            CotejarError::ColumnNotFound { name } => {
                write!(f, "column not found: '{name}'")
            }
            CotejarError::InvalidOption {
                param,
                value,
                constraint,
            } => {
                write!(f, "invalid option: {param} = {value}, expected {constraint}")
            }
            CotejarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CotejarError {}

impl From<&str> for CotejarError {
    fn from(msg: &str) -> Self {
        CotejarError::Other(msg.to_string())
    }
}

impl From<String> for CotejarError {
    fn from(msg: String) -> Self {
        CotejarError::Other(msg)
    }
}

impl CotejarError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput {
            context: context.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CotejarError>;
