//! Callback dispatch errors.

use tollgate_action::ActionError;

/// Errors raised while dispatching a callback.
///
/// Both are terminal for the callback that caused them and are never retried
/// by the node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ApprovalError {
    /// The callback payload has no usable `action` field.
    #[error("callback payload has no `action` field")]
    MissingAction,

    /// The callback names an action that matches no lane.
    #[error("no configured action named `{action}`")]
    UnknownAction {
        /// The offending value, verbatim.
        action: String,
    },
}

impl ApprovalError {
    /// Create an unknown-action error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }

    /// Stable machine-readable discriminant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingAction => "missing_action",
            Self::UnknownAction { .. } => "unknown_action",
        }
    }
}

impl From<ApprovalError> for ActionError {
    fn from(err: ApprovalError) -> Self {
        let details = match &err {
            ApprovalError::MissingAction => serde_json::json!({ "kind": err.kind() }),
            ApprovalError::UnknownAction { action } => {
                serde_json::json!({ "kind": err.kind(), "action": action })
            }
        };
        Self::fatal_with_details(err.to_string(), details)
    }
}
