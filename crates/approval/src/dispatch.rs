//! Callback → lane.

use tollgate_action::{ActionResult, Item, JsonObject};

use crate::error::ApprovalError;
use crate::parameters::ActionDefinition;

/// Payload field naming the chosen action.
pub const ACTION_FIELD: &str = "action";

/// The action a callback names.
///
/// A payload whose `action` is absent, `null`, or not a string names no
/// action at all.
pub fn requested_action(payload: &JsonObject) -> Result<&str, ApprovalError> {
    payload
        .get(ACTION_FIELD)
        .and_then(serde_json::Value::as_str)
        .ok_or(ApprovalError::MissingAction)
}

/// Outcome of looking a callback's action up among the configured actions.
#[derive(Debug, Clone, PartialEq)]
pub enum LaneMatch {
    /// The first definition with that name, by declaration order.
    Matched {
        /// Lane the payload goes to.
        lane_index: usize,
        /// The full callback payload.
        payload: JsonObject,
    },
    /// No definition has that name.
    NoMatch {
        /// The action the callback named.
        action: String,
    },
}

impl LaneMatch {
    /// First match by declaration order; names compare verbatim.
    pub fn find(actions: &[ActionDefinition], action: &str, payload: JsonObject) -> Self {
        match actions.iter().position(|def| def.name == action) {
            Some(lane_index) => Self::Matched {
                lane_index,
                payload,
            },
            None => Self::NoMatch {
                action: action.to_owned(),
            },
        }
    }

    /// Lane index, if matched.
    pub fn lane_index(&self) -> Option<usize> {
        match self {
            Self::Matched { lane_index, .. } => Some(*lane_index),
            Self::NoMatch { .. } => None,
        }
    }

    /// Convert to a routed result carrying one record.
    ///
    /// The record wraps the payload and points back at input item 0.
    pub fn into_result(self) -> Result<ActionResult<Vec<Item>>, ApprovalError> {
        match self {
            Self::Matched {
                lane_index,
                payload,
            } => Ok(ActionResult::route(
                lane_index,
                vec![Item::new(payload).with_paired_item(0)],
            )),
            Self::NoMatch { action } => Err(ApprovalError::UnknownAction { action }),
        }
    }
}
