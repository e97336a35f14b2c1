use async_trait::async_trait;

use crate::action::Action;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::item::Item;
use crate::parameters::NodeParameters;
use crate::port::OutputPort;
use crate::result::ActionResult;
use crate::webhook::{WebhookCallback, WebhookResponse};

/// Action that pauses the run until an external party calls back.
///
/// Used for approval workflows, escalation handling, and any process whose
/// outcome is decided outside the engine.
///
/// The execution flow:
/// 1. `start`: the action announces itself to the outside world and returns
///    [`ActionResult::Wait`]; the engine parks the run.
/// 2. The external party calls the webhook address carried by the wait
///    condition, possibly much later, possibly never.
/// 3. `resume`: the action turns the inbound callback into its final result.
///
/// The two entry points share nothing in memory. Anything `resume` needs
/// must be re-derived from [`ActionContext::parameters`] or the callback.
///
/// The trait is object-safe; the runtime stores implementations as
/// `Arc<dyn InteractiveAction>`.
#[async_trait]
pub trait InteractiveAction: Action {
    /// Output ports of one configured node.
    ///
    /// Called at design time, with no run in progress, and again by the engine
    /// whenever it needs the port count. Must be a pure function of
    /// `parameters`. Defaults to the ports declared in the metadata.
    fn output_ports(&self, parameters: &NodeParameters) -> Result<Vec<OutputPort>, ActionError> {
        let _ = parameters;
        Ok(self.metadata().outputs.clone())
    }

    /// First invocation of the node within a run.
    async fn start(
        &self,
        input: Vec<Item>,
        ctx: &ActionContext,
    ) -> Result<ActionResult<Vec<Item>>, ActionError>;

    /// Second invocation, carrying the external party's callback.
    async fn resume(
        &self,
        callback: WebhookCallback,
        ctx: &ActionContext,
    ) -> Result<WebhookResponse, ActionError>;
}
