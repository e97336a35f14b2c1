//! The approval node itself.

use std::sync::Arc;

use async_trait::async_trait;
use tollgate_action::{
    Action, ActionContext, ActionError, ActionMetadata, ActionResult, InteractiveAction, Item,
    NodeParameters, OutputPort, WebhookCallback, WebhookResponse,
};

use crate::dispatch::{LaneMatch, requested_action};
use crate::notify::ApprovalNotifier;
use crate::parameters::ApprovalParameters;
use crate::request::ApprovalRequest;
use crate::topology::resolve_lanes;

/// Registry key of the approval node.
pub const APPROVAL_ACTION_KEY: &str = "approval.send_and_wait";

/// Credential holding the sending account id.
pub const ACCOUNT_ID_CREDENTIAL: &str = "account_id";

/// Sends an approval request, waits for the decision, routes on it.
///
/// The node holds no per-run state. `start` and `resume` both re-read the
/// configuration from the context, so any number of runs may share one
/// instance.
pub struct ApprovalNode {
    meta: ActionMetadata,
    notifier: Arc<dyn ApprovalNotifier>,
}

impl ApprovalNode {
    /// Create a node delivering requests through `notifier`.
    pub fn new(notifier: Arc<dyn ApprovalNotifier>) -> Self {
        Self {
            meta: ActionMetadata::new(
                APPROVAL_ACTION_KEY,
                "Send and Wait for Approval",
                "Send a message and route the run on the action the recipient picks",
            )
            .with_category("human-in-the-loop")
            .with_outputs(Vec::new())
            .with_required_credential(ACCOUNT_ID_CREDENTIAL),
            notifier,
        }
    }
}

impl Action for ApprovalNode {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }
}

#[async_trait]
impl InteractiveAction for ApprovalNode {
    fn output_ports(&self, parameters: &NodeParameters) -> Result<Vec<OutputPort>, ActionError> {
        let actions = ApprovalParameters::actions(parameters)?;
        Ok(resolve_lanes(&actions)
            .iter()
            .map(|lane| lane.to_output_port())
            .collect())
    }

    async fn start(
        &self,
        input: Vec<Item>,
        ctx: &ActionContext,
    ) -> Result<ActionResult<Vec<Item>>, ActionError> {
        ctx.check_cancelled()?;

        let parameters = ApprovalParameters::from_parameters(ctx.parameters())?;
        let callback_url = ctx.callback_url()?;
        let account_id = ctx.credential(ACCOUNT_ID_CREDENTIAL).await?;

        let request = ApprovalRequest::new(parameters, callback_url.clone(), account_id.expose());
        tracing::info!(
            execution_id = %ctx.execution_id,
            node_id = %ctx.node_id,
            callback_url = %callback_url,
            actions = request.actions.len(),
            "sending approval request"
        );
        self.notifier.notify(request);

        Ok(ActionResult::wait_for_webhook(callback_url, input))
    }

    async fn resume(
        &self,
        callback: WebhookCallback,
        ctx: &ActionContext,
    ) -> Result<WebhookResponse, ActionError> {
        let payload = callback.payload();
        let action = requested_action(&payload)?.to_owned();
        let actions = ApprovalParameters::actions(ctx.parameters())?;

        let lane_match = LaneMatch::find(&actions, &action, payload);
        let lane = lane_match.lane_index();
        let result = lane_match.into_result()?;
        tracing::info!(
            execution_id = %ctx.execution_id,
            node_id = %ctx.node_id,
            action = %action,
            lane = ?lane,
            "approval decision received"
        );
        Ok(WebhookResponse::ok(result))
    }
}
