//! What the host keeps about a started node.

use chrono::{DateTime, Utc};
use tollgate_action::{Item, NodeParameters};
use tollgate_core::WorkflowId;
use url::Url;

use crate::error::ExecutionError;
use crate::idempotency::WaitKey;
use crate::status::RunStatus;
use crate::transition::validate_transition;

/// A node run held by the host from `start` until its outcome.
///
/// Registered `Running` before the action is invoked, then parked as
/// `Waiting` once it asks for a callback. Carries no action-private state:
/// the parameters snapshot and the pending records are all the host needs to
/// rebuild the context for `resume`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkedRun {
    /// Correlation key for the callback.
    pub key: WaitKey,
    /// Workflow the run belongs to.
    pub workflow_id: WorkflowId,
    /// Registry key of the action.
    pub action_key: String,
    /// Node configuration as it was at `start`.
    pub parameters: NodeParameters,
    /// Input records passed through while waiting.
    pub pending: Vec<Item>,
    /// Address the external party was told to call, once parked.
    pub callback_url: Option<Url>,
    /// Current status.
    pub status: RunStatus,
    /// When `start` was entered.
    pub started_at: DateTime<Utc>,
    /// When the run last changed status.
    pub updated_at: DateTime<Utc>,
}

impl ParkedRun {
    /// Create a run in the `Running` state.
    #[must_use]
    pub fn running(
        key: WaitKey,
        workflow_id: WorkflowId,
        action_key: impl Into<String>,
        parameters: NodeParameters,
    ) -> Self {
        let now = Utc::now();
        Self {
            key,
            workflow_id,
            action_key: action_key.into(),
            parameters,
            pending: Vec::new(),
            callback_url: None,
            status: RunStatus::Running,
            started_at: now,
            updated_at: now,
        }
    }

    /// Move to `Waiting`, holding `pending` until `callback_url` is called.
    pub fn park(&mut self, pending: Vec<Item>, callback_url: Url) -> Result<(), ExecutionError> {
        self.transition_to(RunStatus::Waiting)?;
        self.pending = pending;
        self.callback_url = Some(callback_url);
        Ok(())
    }

    /// Transition to a new status, validating the transition.
    pub fn transition_to(&mut self, status: RunStatus) -> Result<(), ExecutionError> {
        validate_transition(self.status, status)?;
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}
