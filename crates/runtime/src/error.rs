//! Runtime error types.

use tollgate_action::ActionError;
use tollgate_execution::{ExecutionError, WaitKey};

/// Errors from the runtime layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RuntimeError {
    /// Action not found in the registry.
    #[error("action not found: {key}")]
    ActionNotFound {
        /// The action key that was looked up.
        key: String,
    },

    /// The action itself failed.
    #[error("action error: {0}")]
    Action(#[from] ActionError),

    /// Run bookkeeping rejected the operation.
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// No run is parked under this key.
    #[error("run {key} is not suspended")]
    NotSuspended {
        /// The key that was looked up.
        key: WaitKey,
    },

    /// A callback address could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl RuntimeError {
    /// Whether the caller may retry the same operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Execution(e) if e.is_retryable())
    }

    /// The underlying action error, if this is one.
    pub fn as_action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Action(e) => Some(e),
            _ => None,
        }
    }
}
