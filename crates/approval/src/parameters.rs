//! Typed view of the node's configuration.

use serde::{Deserialize, Deserializer, Serialize};
use tollgate_action::{ActionError, NodeParameters};

/// Parameter key of the email subject.
pub const SUBJECT: &str = "subject";
/// Parameter key of the message body.
pub const MESSAGE: &str = "message";
/// Parameter key of the action list.
pub const ACTIONS: &str = "actions";

/// One choice offered to the approver.
///
/// `name` is matched verbatim against the callback's `action`. Names are not
/// required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Label shown to the approver and expected back in the callback.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ActionDefinition {
    /// Create a definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Everything the node reads from its configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalParameters {
    /// Subject line; empty when not configured.
    pub subject: String,
    /// Message body; empty when not configured.
    pub message: String,
    /// Declared actions, in declaration order.
    pub actions: Vec<ActionDefinition>,
}

impl ApprovalParameters {
    /// Read the full configuration.
    pub fn from_parameters(parameters: &NodeParameters) -> Result<Self, ActionError> {
        Ok(Self {
            subject: parameters.string_or_default(SUBJECT)?,
            message: parameters.string_or_default(MESSAGE)?,
            actions: Self::actions(parameters)?,
        })
    }

    /// Read only the action list. An absent list is empty.
    pub fn actions(parameters: &NodeParameters) -> Result<Vec<ActionDefinition>, ActionError> {
        parameters.list(ACTIONS)
    }
}
