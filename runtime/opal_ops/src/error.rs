//! Errors reported by operator fallbacks.
//!
//! Only `fallback` surfaces errors as values. Identity misuse (a bad `cast`,
//! an unissued type code) is a caller bug and panics instead.

use opal_value::{ValueError, ValueRef};
use std::fmt;

/// Result of running an operator's fallback path.
pub type FallbackResult = Result<Vec<ValueRef>, FallbackError>;

/// Why a fallback did not produce outputs.
///
/// `Unsupported` means the operator has no generic implementation at all;
/// every other variant means a fallback exists and failed on these inputs.
/// Callers branch on [`FallbackError::is_unsupported`] to pick another
/// execution path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackError {
    #[error("no fallback implementation for {operator}")]
    Unsupported { operator: String },

    #[error("{operator} expects {expected} input(s), got {got}")]
    Arity {
        operator: String,
        expected: usize,
        got: usize,
    },

    #[error("{operator}: input {index} {reason}")]
    InvalidInput {
        operator: String,
        index: usize,
        reason: String,
    },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl FallbackError {
    pub fn unsupported(operator: &dyn fmt::Display) -> Self {
        FallbackError::Unsupported {
            operator: operator.to_string(),
        }
    }

    pub fn arity(operator: &dyn fmt::Display, expected: usize, got: usize) -> Self {
        FallbackError::Arity {
            operator: operator.to_string(),
            expected,
            got,
        }
    }

    pub fn invalid_input(
        operator: &dyn fmt::Display,
        index: usize,
        reason: impl Into<String>,
    ) -> Self {
        FallbackError::InvalidInput {
            operator: operator.to_string(),
            index,
            reason: reason.into(),
        }
    }

    /// True if the operator has no fallback, as opposed to a fallback that
    /// ran and failed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FallbackError::Unsupported { .. })
    }
}
