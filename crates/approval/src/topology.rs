//! Configuration → output lanes.

use serde::{Deserialize, Serialize};
use tollgate_action::OutputPort;

use crate::parameters::ActionDefinition;

/// One output branch of a configured approval node.
///
/// Lanes are structurally identical; the index is the only thing dispatch
/// uses to address one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    /// 0-based position, equal to the action's declaration position.
    pub index: usize,
    /// Label shown on the connection handle.
    pub display_name: String,
}

impl Lane {
    /// Port key the engine wires this lane under.
    pub fn port_key(&self) -> String {
        format!("output_{}", self.index)
    }

    /// Describe the lane as an output port.
    pub fn to_output_port(&self) -> OutputPort {
        OutputPort::main(self.port_key(), self.display_name.clone())
    }
}

/// One lane per definition, in declaration order.
///
/// An empty name falls back to `"Action {index}"`. Pure: the same input always
/// yields the same lanes, and an empty list yields none.
pub fn resolve_lanes(actions: &[ActionDefinition]) -> Vec<Lane> {
    actions
        .iter()
        .enumerate()
        .map(|(index, action)| Lane {
            index,
            display_name: if action.name.is_empty() {
                format!("Action {index}")
            } else {
                action.name.clone()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn defs(names: &[&str]) -> Vec<ActionDefinition> {
        names.iter().copied().map(ActionDefinition::new).collect()
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&["Approve"], 1)]
    #[case(&["Approve", "Decline", "Escalate"], 3)]
    fn one_lane_per_action(#[case] names: &[&str], #[case] expected: usize) {
        let lanes = resolve_lanes(&defs(names));
        assert_eq!(lanes.len(), expected);
        for (i, lane) in lanes.iter().enumerate() {
            assert_eq!(lane.index, i);
        }
    }

    #[test]
    fn names_and_fallbacks() {
        let lanes = resolve_lanes(&defs(&["Approve", "", "Decline", ""]));
        let names: Vec<_> = lanes.iter().map(|l| l.display_name.as_str()).collect();
        assert_eq!(names, vec!["Approve", "Action 1", "Decline", "Action 3"]);
    }

    #[test]
    fn duplicate_names_keep_separate_lanes() {
        let lanes = resolve_lanes(&defs(&["A", "A"]));
        assert_eq!(
            lanes,
            vec![
                Lane { index: 0, display_name: "A".into() },
                Lane { index: 1, display_name: "A".into() },
            ]
        );
    }

    #[test]
    fn idempotent() {
        let actions = defs(&["Approve", "", "Decline"]);
        assert_eq!(resolve_lanes(&actions), resolve_lanes(&actions));
    }

    #[test]
    fn lane_as_output_port() {
        let port = resolve_lanes(&defs(&["", "Decline"]))[1].to_output_port();
        assert_eq!(port, OutputPort::main("output_1", "Decline"));
    }

    #[test]
    fn lane_serializes_camel_case() {
        let json = serde_json::to_value(Lane { index: 0, display_name: "Approve".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"index": 0, "displayName": "Approve"}));
    }
}
