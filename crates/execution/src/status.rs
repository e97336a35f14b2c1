//! Run-level status tracking for a single node invocation.

use serde::{Deserialize, Serialize};

/// The status of one node's run, from first invocation to its final outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// `start` is executing.
    Running,
    /// Parked, waiting for an external callback.
    Waiting,
    /// A callback has been claimed and `resume` is executing.
    Resuming,
    /// Produced its final outputs.
    Completed,
    /// `start` failed; the run never parked.
    Failed,
    /// Aborted from outside while parked.
    Cancelled,
}

impl RunStatus {
    /// Returns `true` if the run has reached a final state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Returns `true` if the host is holding the run for a callback.
    #[must_use]
    pub fn is_parked(&self) -> bool {
        matches!(self, Self::Waiting | Self::Resuming)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Waiting => write!(f, "waiting"),
            Self::Resuming => write!(f, "resuming"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}
