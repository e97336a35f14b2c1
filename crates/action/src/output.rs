use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::item::Item;
use crate::result::ActionResult;

/// Positional per-port output of one node execution.
///
/// Slot `i` holds the record set emitted on the node's output port `i`. The
/// engine wires slots to downstream connections by index, so the length must
/// equal the node's resolved port count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeOutputs(Vec<Vec<Item>>);

impl NodeOutputs {
    /// `port_count` empty record sets.
    #[must_use]
    pub fn empty(port_count: usize) -> Self {
        Self(vec![Vec::new(); port_count])
    }

    /// A single-port output.
    #[must_use]
    pub fn single(items: Vec<Item>) -> Self {
        Self(vec![items])
    }

    /// `port_count` slots, all empty except `port`, which holds `data`.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ActionError`] if `port` is not below `port_count`.
    pub fn routed(port: usize, data: Vec<Item>, port_count: usize) -> Result<Self, ActionError> {
        if port >= port_count {
            return Err(ActionError::fatal_with_details(
                format!("output port {port} out of range for a node with {port_count} ports"),
                serde_json::json!({ "port": port, "port_count": port_count }),
            ));
        }
        let mut slots = Self::empty(port_count);
        slots.0[port] = data;
        Ok(slots)
    }

    /// Number of slots.
    #[must_use]
    pub fn port_count(&self) -> usize {
        self.0.len()
    }

    /// Record set of one port.
    #[must_use]
    pub fn port(&self, index: usize) -> Option<&[Item]> {
        self.0.get(index).map(Vec::as_slice)
    }

    /// Indices of the ports that carry at least one record.
    pub fn populated_ports(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, items)| !items.is_empty())
            .map(|(index, _)| index)
    }

    /// Unwrap into the raw positional vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Vec<Item>> {
        self.0
    }
}

impl From<Vec<Vec<Item>>> for NodeOutputs {
    fn from(slots: Vec<Vec<Item>>) -> Self {
        Self(slots)
    }
}

impl ActionResult<Vec<Item>> {
    /// Convert into the positional shape the engine consumes.
    ///
    /// `Success` lands on port 0, `Route` on its port, and `Wait` yields a
    /// single slot carrying the pending records.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ActionError`] if the target port does not exist.
    pub fn into_outputs(self, port_count: usize) -> Result<NodeOutputs, ActionError> {
        match self {
            Self::Success { output } => NodeOutputs::routed(0, output, port_count),
            Self::Route { port, data } => NodeOutputs::routed(port, data, port_count),
            Self::Wait { partial_output, .. } => {
                Ok(NodeOutputs::single(partial_output.unwrap_or_default()))
            }
        }
    }
}
