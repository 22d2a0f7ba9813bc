//! Quiz engine error types.
//!
//! Every failure here is local to the call site. An unknown option id is
//! intentionally absent: the session ignores it instead of failing.

use thiserror::Error;

/// Errors produced by the catalog and the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// No quiz with this id exists in the catalog.
    #[error("quiz not found: {0}")]
    NotFound(String),

    /// The quiz definition is malformed.
    #[error("invalid quiz `{quiz_id}`: {reason}")]
    Validation { quiz_id: String, reason: String },

    /// The operation is not legal in the session's current state.
    #[error("cannot {operation} while session is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    /// The embedded quiz sets could not be loaded.
    #[error("built-in catalog is unusable: {0}")]
    Catalog(String),
}

impl QuizError {
    pub(crate) fn validation(quiz_id: &str, reason: impl Into<String>) -> Self {
        QuizError::Validation {
            quiz_id: quiz_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error means the caller drove the session wrongly.
    ///
    /// These are bugs in the presentation layer and belong in logs rather
    /// than in front of an end user.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, QuizError::InvalidTransition { .. })
    }
}
