use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::item::JsonObject;

/// Read-only configuration of one node in a workflow.
///
/// The engine hands the same parameters to every entry point of a node:
/// topology resolution at design time, and both `start` and `resume` at run
/// time. Reads are typed; a value of the wrong shape is a
/// [`ActionError::Validation`], an absent value is not an error.
///
/// `null` is treated the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeParameters(JsonObject);

impl NodeParameters {
    /// Create parameters from a JSON object.
    #[must_use]
    pub fn new(values: JsonObject) -> Self {
        Self(values)
    }

    /// Create parameters from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] if `value` is not a JSON object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ActionError> {
        match value {
            serde_json::Value::Object(map) => Ok(Self(map)),
            other => Err(ActionError::validation(format!(
                "node parameters must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Builder-style setter, mostly useful in tests and fixtures.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Raw access to a value. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Read a string parameter.
    pub fn string(&self, key: &str) -> Result<Option<String>, ActionError> {
        match self.get(key) {
            None => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ActionError::validation(format!(
                "parameter `{key}` must be a string, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Read a string parameter, falling back to an empty string.
    pub fn string_or_default(&self, key: &str) -> Result<String, ActionError> {
        Ok(self.string(key)?.unwrap_or_default())
    }

    /// Read a list parameter, deserializing every element as `T`.
    ///
    /// An absent list reads as empty.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ActionError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(value @ serde_json::Value::Array(_)) => serde_json::from_value(value.clone())
                .map_err(|e| ActionError::validation(format!("parameter `{key}`: {e}"))),
            Some(other) => Err(ActionError::validation(format!(
                "parameter `{key}` must be a list, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Deserialize a parameter into any `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ActionError> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| ActionError::validation(format!("parameter `{key}`: {e}")))
            })
            .transpose()
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &JsonObject {
        &self.0
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
