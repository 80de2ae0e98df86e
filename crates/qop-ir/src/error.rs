//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A parametric type was requested with parameters outside its domain.
    #[error("invalid parameter for '{keyword}' type: {reason}")]
    InvalidTypeParameter {
        /// Keyword of the type being constructed.
        keyword: &'static str,
        /// What was wrong with the parameters.
        reason: String,
    },

    /// An accessor list with more than three components.
    #[error("register accessor lists hold at most 3 components, got {0}")]
    TooManyAccessors(usize),

    /// Flat operands, segment sizes and accessor attributes disagree.
    #[error("malformed operation: {0}")]
    MalformedOperation(String),
}

impl IrError {
    pub(crate) fn invalid_param(keyword: &'static str, reason: impl Into<String>) -> Self {
        IrError::InvalidTypeParameter {
            keyword,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        IrError::MalformedOperation(message.into())
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
