//! Execution error types.

use thiserror::Error;

use crate::idempotency::WaitKey;
use crate::status::RunStatus;

/// Errors raised by run bookkeeping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// A state transition is not valid for the current status.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: RunStatus,
        /// Attempted target status.
        to: RunStatus,
    },

    /// No parked run exists under this key, and none ever completed under it.
    #[error("no suspended run for {0}")]
    UnknownRun(WaitKey),

    /// The run under this key has already been resumed to completion.
    #[error("run {0} has already been resumed")]
    AlreadyResumed(WaitKey),

    /// Another callback for this key is being processed right now.
    #[error("run {0} is already being resumed")]
    ResumeInProgress(WaitKey),

    /// A run under this key has already been started and not yet finished.
    #[error("run {0} has already been started")]
    AlreadyStarted(WaitKey),
}

impl ExecutionError {
    /// Create an invalid-transition error.
    pub fn invalid_transition(from: RunStatus, to: RunStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Returns `true` if a later callback for the same key could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResumeInProgress(_))
    }
}
