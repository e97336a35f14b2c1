use serde::{Deserialize, Serialize};

use crate::port::{self, OutputPort};

/// Static metadata describing an action type.
///
/// Used by the engine for action discovery and editor grouping. Ports
/// declared here are the action's static topology; configuration-driven
/// actions override them per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    /// Unique key identifying this action type (e.g. `"approval.send_and_wait"`).
    pub key: String,
    /// Human-readable display name.
    pub name: String,
    /// Short description of what this action does.
    pub description: String,
    /// Category for UI grouping (e.g. `"human-in-the-loop"`).
    pub category: String,
    /// Declared output ports.
    pub outputs: Vec<OutputPort>,
    /// Credential keys this action reads at run time.
    pub required_credentials: Vec<String>,
}

impl ActionMetadata {
    /// Create metadata with the minimum required fields.
    ///
    /// Defaults: no category, one `"out"` output, no credentials.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            category: String::new(),
            outputs: port::default_output_ports(),
            required_credentials: Vec::new(),
        }
    }

    /// Set the UI category for this action.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Replace the declared output ports.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<OutputPort>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Add a credential key this action requires.
    #[must_use]
    pub fn with_required_credential(mut self, credential_key: impl Into<String>) -> Self {
        self.required_credentials.push(credential_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let meta = ActionMetadata::new("demo.echo", "Echo", "Echoes input");
        assert_eq!(meta.key, "demo.echo");
        assert_eq!(meta.outputs, vec![OutputPort::flow("out")]);
        assert!(meta.category.is_empty());
        assert!(meta.required_credentials.is_empty());
    }

    #[test]
    fn builder_chain() {
        let meta = ActionMetadata::new("approval.send_and_wait", "Send and Wait", "")
            .with_category("human-in-the-loop")
            .with_outputs(Vec::new())
            .with_required_credential("account_id");
        assert_eq!(meta.category, "human-in-the-loop");
        assert!(meta.outputs.is_empty());
        assert_eq!(meta.required_credentials, vec!["account_id".to_owned()]);
    }
}
