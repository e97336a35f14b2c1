use std::time::Duration;

use url::Url;

/// Result of an action execution, carrying both data and flow-control intent.
///
/// The engine matches on this enum to decide what happens next in the workflow:
/// - `Success` → pass output to the node's first output port
/// - `Route` → pass output to exactly one output port, addressed by index
/// - `Wait` → park the run until an external event arrives
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ActionResult<T> {
    /// Successful completion; the engine passes output to dependent nodes.
    Success {
        /// The produced output value.
        output: T,
    },

    /// Route output to a single output port.
    ///
    /// Every other port of the node receives an empty record set.
    Route {
        /// Index of the target port in the node's resolved output ports.
        port: usize,
        /// Data to send to the port.
        data: T,
    },

    /// Pause execution until an external condition is met.
    ///
    /// Engine persists state and resumes when the condition triggers.
    Wait {
        /// The condition that must be satisfied to resume.
        condition: WaitCondition,
        /// Maximum time to wait; `None` waits until cancelled from outside.
        timeout: Option<Duration>,
        /// Output held by the engine while the run is parked.
        partial_output: Option<T>,
    },
}

/// Condition that must be met before a waiting action resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WaitCondition {
    /// Wait for an inbound HTTP callback.
    Webhook {
        /// Address the external caller must hit to resume this node.
        callback_url: Url,
    },
}

// ── Convenience constructors ────────────────────────────────────────────────

impl<T> ActionResult<T> {
    /// Create a successful result.
    pub fn success(output: T) -> Self {
        Self::Success { output }
    }

    /// Create a result routed to the output port at `port`.
    pub fn route(port: usize, data: T) -> Self {
        Self::Route { port, data }
    }

    /// Park the run until `callback_url` is called, with no timeout.
    ///
    /// `pending` is held by the engine for the duration of the wait.
    pub fn wait_for_webhook(callback_url: Url, pending: T) -> Self {
        Self::Wait {
            condition: WaitCondition::Webhook { callback_url },
            timeout: None,
            partial_output: Some(pending),
        }
    }

    /// Returns `true` if this is a `Wait` variant.
    pub fn is_waiting(&self) -> bool {
        matches!(self, Self::Wait { .. })
    }
}
