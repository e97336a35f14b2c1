//! Action runtime: starts, parks, and resumes actions.
//!
//! The runtime is the host side of the suspend/resume contract. An action
//! never sees another run's state, and never keeps its own between `start`
//! and `resume`: everything it needs on the second call is rebuilt here from
//! the parked snapshot.

use std::sync::Arc;

use tollgate_action::{
    ActionContext, ActionError, ActionResult, CredentialProvider, Item, NodeOutputs,
    NodeParameters, OutputPort, WaitCondition, WebhookCallback,
};
use tollgate_core::{ExecutionId, NodeId, WorkflowId};
use tollgate_execution::{ParkedRun, RunStatus, WaitKey};
use url::Url;

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::registry::ActionRegistry;
use crate::wait::WaitRegistry;

/// Everything needed to invoke a node for the first time.
#[derive(Debug, Clone)]
pub struct StartRequest {
    /// Run the node belongs to.
    pub execution_id: ExecutionId,
    /// Workflow being executed.
    pub workflow_id: WorkflowId,
    /// Node being invoked.
    pub node_id: NodeId,
    /// Node configuration.
    pub parameters: NodeParameters,
    /// Records arriving on the node's input.
    pub input: Vec<Item>,
}

impl StartRequest {
    /// Create a request with fresh identifiers and no input.
    pub fn new(parameters: NodeParameters) -> Self {
        Self {
            execution_id: ExecutionId::v4(),
            workflow_id: WorkflowId::v4(),
            node_id: NodeId::v4(),
            parameters,
            input: Vec::new(),
        }
    }

    /// Set the input records.
    #[must_use]
    pub fn with_input(mut self, input: Vec<Item>) -> Self {
        self.input = input;
        self
    }

    /// Use an existing execution id.
    #[must_use]
    pub fn with_execution_id(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = execution_id;
        self
    }

    /// Use an existing workflow id.
    #[must_use]
    pub fn with_workflow_id(mut self, workflow_id: WorkflowId) -> Self {
        self.workflow_id = workflow_id;
        self
    }

    /// Use an existing node id.
    #[must_use]
    pub fn with_node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = node_id;
        self
    }

    /// The wait key this node would be parked under.
    #[must_use]
    pub fn wait_key(&self) -> WaitKey {
        WaitKey::new(self.execution_id, self.node_id)
    }
}

/// What happened when a node was started.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StartOutcome {
    /// The action finished without waiting.
    Completed(NodeOutputs),
    /// The action asked to wait; the run is parked.
    Suspended {
        /// Key to resume the run with.
        key: WaitKey,
        /// Address the external party was told to call.
        callback_url: Url,
        /// Records held while waiting.
        pending: Vec<Item>,
    },
}

impl StartOutcome {
    /// The wait key, if the run was parked.
    pub fn wait_key(&self) -> Option<WaitKey> {
        match self {
            Self::Suspended { key, .. } => Some(*key),
            Self::Completed(_) => None,
        }
    }
}

/// Result of delivering a callback to a parked run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeOutcome {
    /// Text to return to the external caller.
    pub acknowledgement: String,
    /// Positional outputs, one slot per resolved output port.
    pub outputs: NodeOutputs,
}

/// The action runtime hosts interactive actions.
///
/// 1. Looks up the action in the registry
/// 2. Builds the [`ActionContext`] (ids, resume address, parameters, credentials)
/// 3. Reserves the wait key, so a repeated `start` never reaches the action
/// 4. Invokes `start`; a `Wait` result parks the run in the [`WaitRegistry`]
/// 5. On callback, claims the run, invokes `resume`, and converts the result
///    into one output slot per resolved port
pub struct ActionRuntime {
    registry: Arc<ActionRegistry>,
    waits: Arc<WaitRegistry>,
    config: RuntimeConfig,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl ActionRuntime {
    /// Create a runtime with an empty wait registry and no credentials.
    pub fn new(registry: Arc<ActionRegistry>, config: RuntimeConfig) -> Self {
        Self {
            registry,
            waits: Arc::new(WaitRegistry::with_retention(config.resume_retention)),
            config,
            credentials: None,
        }
    }

    /// Attach a credential provider handed to every action context.
    #[must_use]
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Access the parked runs.
    pub fn waits(&self) -> &WaitRegistry {
        &self.waits
    }

    /// Access the configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Output ports a node configured with `parameters` exposes.
    ///
    /// Needs no run; the engine calls this while wiring the graph.
    pub fn resolve_outputs(
        &self,
        action_key: &str,
        parameters: &NodeParameters,
    ) -> Result<Vec<OutputPort>, RuntimeError> {
        let action = self.registry.get(action_key)?;
        Ok(action.output_ports(parameters)?)
    }

    /// Invoke a node for the first time.
    ///
    /// The wait key is reserved before the action runs: a second `start` for
    /// a key that is running or parked fails with `AlreadyStarted`, and one
    /// for a key already resumed fails with `AlreadyResumed`. A run that
    /// fails or completes without waiting frees its key.
    pub async fn start(
        &self,
        action_key: &str,
        request: StartRequest,
    ) -> Result<StartOutcome, RuntimeError> {
        let action = self.registry.get(action_key)?;
        let key = request.wait_key();
        let StartRequest {
            execution_id,
            workflow_id,
            node_id,
            parameters,
            input,
        } = request;
        let ctx = self.context(execution_id, node_id, workflow_id, parameters.clone())?;

        self.waits.reserve(ParkedRun::running(
            key,
            workflow_id,
            action_key,
            parameters.clone(),
        ))?;
        tracing::debug!(
            action_key,
            %execution_id,
            %node_id,
            items = input.len(),
            "starting action"
        );

        let attempt: Result<StartOutcome, RuntimeError> = async {
            match action.start(input, &ctx).await? {
                ActionResult::Wait {
                    condition,
                    partial_output,
                    ..
                } => {
                    let callback_url = webhook_url(condition)?;
                    let pending = partial_output.unwrap_or_default();
                    self.waits.park(key, pending.clone(), callback_url.clone())?;
                    tracing::info!(
                        action_key,
                        wait_key = %key,
                        callback_url = %callback_url,
                        "run suspended"
                    );
                    Ok(StartOutcome::Suspended {
                        key,
                        callback_url,
                        pending,
                    })
                }
                other => {
                    let port_count = action.output_ports(&parameters)?.len();
                    Ok(StartOutcome::Completed(other.into_outputs(port_count)?))
                }
            }
        }
        .await;

        match attempt {
            Ok(StartOutcome::Completed(outputs)) => {
                self.settle(key, RunStatus::Completed);
                tracing::debug!(action_key, wait_key = %key, "action completed without waiting");
                Ok(StartOutcome::Completed(outputs))
            }
            Ok(suspended) => Ok(suspended),
            Err(err) => {
                tracing::warn!(action_key, wait_key = %key, error = %err, "action start failed");
                self.settle(key, RunStatus::Failed);
                Err(err)
            }
        }
    }

    /// Deliver a callback to the run parked under `key`.
    ///
    /// The run is claimed first, so a concurrent second callback fails with
    /// `ResumeInProgress` and a late one with `AlreadyResumed`. If `resume`
    /// fails, the run goes back to waiting and the error is returned.
    pub async fn resume(
        &self,
        key: WaitKey,
        callback: WebhookCallback,
    ) -> Result<ResumeOutcome, RuntimeError> {
        let parked = self.waits.claim(key)?;

        match self.resume_claimed(&parked, callback).await {
            Ok(outcome) => {
                self.waits.complete(key)?;
                tracing::info!(
                    action_key = %parked.action_key,
                    wait_key = %key,
                    lanes = ?outcome.outputs.populated_ports().collect::<Vec<_>>(),
                    "run resumed"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(
                    action_key = %parked.action_key,
                    wait_key = %key,
                    error = %err,
                    retryable = err.is_retryable(),
                    "resume failed, run stays suspended"
                );
                if let Err(release_err) = self.waits.release(key) {
                    tracing::error!(
                        wait_key = %key,
                        error = %release_err,
                        "failed to release run after resume error"
                    );
                }
                Err(err)
            }
        }
    }

    /// Abort a parked run that no callback is processing.
    pub fn cancel(&self, key: WaitKey) -> Result<ParkedRun, RuntimeError> {
        let run = self.waits.cancel(key)?;
        tracing::info!(action_key = %run.action_key, wait_key = %key, "run cancelled");
        Ok(run)
    }

    /// Snapshot of the run parked under `key`.
    pub fn parked(&self, key: WaitKey) -> Result<ParkedRun, RuntimeError> {
        self.waits
            .get(&key)
            .ok_or(RuntimeError::NotSuspended { key })
    }

    fn settle(&self, key: WaitKey, status: RunStatus) {
        if let Err(err) = self.waits.finish(key, status) {
            tracing::error!(wait_key = %key, %status, error = %err, "failed to settle started run");
        }
    }

    async fn resume_claimed(
        &self,
        parked: &ParkedRun,
        callback: WebhookCallback,
    ) -> Result<ResumeOutcome, RuntimeError> {
        let action = self.registry.get(&parked.action_key)?;
        let ctx = self.context(
            parked.key.execution_id,
            parked.key.node_id,
            parked.workflow_id,
            parked.parameters.clone(),
        )?;

        let response = action.resume(callback, &ctx).await?;
        if response.result.is_waiting() {
            return Err(ActionError::fatal("a resumed action cannot suspend again").into());
        }

        let port_count = action.output_ports(&parked.parameters)?.len();
        let outputs = response.result.into_outputs(port_count)?;
        Ok(ResumeOutcome {
            acknowledgement: response.acknowledgement,
            outputs,
        })
    }

    fn context(
        &self,
        execution_id: ExecutionId,
        node_id: NodeId,
        workflow_id: WorkflowId,
        parameters: NodeParameters,
    ) -> Result<ActionContext, RuntimeError> {
        let resume_url = self.config.resume_url(execution_id)?;
        let ctx = ActionContext::new(execution_id, node_id, workflow_id, resume_url)
            .with_parameters(parameters);
        Ok(match &self.credentials {
            Some(provider) => ctx.with_credentials(Arc::clone(provider)),
            None => ctx,
        })
    }
}

fn webhook_url(condition: WaitCondition) -> Result<Url, RuntimeError> {
    match condition {
        WaitCondition::Webhook { callback_url } => Ok(callback_url),
        other => Err(ActionError::fatal(format!("unsupported wait condition: {other:?}")).into()),
    }
}
