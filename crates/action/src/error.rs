/// Error type for all action operations.
///
/// Every variant ends the invocation that raised it. Whether the run can be
/// attempted again is decided by the host, not the action.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// Permanent failure, never retried.
    ///
    /// Unknown callback action, missing credential, business logic rejection.
    #[error("fatal: {error}")]
    Fatal {
        /// Human-readable error message.
        error: String,
        /// Optional structured details about the failure.
        details: Option<serde_json::Value>,
    },

    /// Node configuration or input failed validation before execution began.
    #[error("validation: {0}")]
    Validation(String),

    /// Execution cancelled via cancellation token.
    #[error("cancelled")]
    Cancelled,
}

impl ActionError {
    /// Create a fatal error.
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal {
            error: msg.into(),
            details: None,
        }
    }

    /// Create a fatal error with structured details.
    pub fn fatal_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Fatal {
            error: msg.into(),
            details: Some(details),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns `true` if this error is permanent and should never be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. } | Self::Validation(_))
    }

    /// Structured details attached to a fatal error, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Fatal { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
