use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tollgate_core::id::{ExecutionId, NodeId, WorkflowId};
use url::Url;

use crate::error::ActionError;
use crate::parameters::NodeParameters;
use crate::provider::{CredentialProvider, SecureString};

/// Runtime context provided to every action during execution.
///
/// Constructed by the engine before invoking an action, once for `start` and
/// again for `resume`. Nothing an action stores on the context survives from
/// one invocation to the next: the second context is rebuilt from the same
/// identifiers and the same node parameters.
#[non_exhaustive]
pub struct ActionContext {
    /// Unique execution run identifier.
    pub execution_id: ExecutionId,
    /// Node in the workflow graph being executed. Stable across suspend/resume.
    pub node_id: NodeId,
    /// Workflow this execution belongs to.
    pub workflow_id: WorkflowId,
    /// Resumable base address of the current run.
    pub resume_url: Url,
    /// Cancellation signal, checked cooperatively by actions.
    pub cancellation: CancellationToken,
    parameters: NodeParameters,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl ActionContext {
    /// Create a new context with the given identifiers.
    pub fn new(
        execution_id: ExecutionId,
        node_id: NodeId,
        workflow_id: WorkflowId,
        resume_url: Url,
    ) -> Self {
        Self {
            execution_id,
            node_id,
            workflow_id,
            resume_url,
            cancellation: CancellationToken::new(),
            parameters: NodeParameters::default(),
            credentials: None,
        }
    }

    /// Attach the node's configuration.
    pub fn with_parameters(mut self, parameters: NodeParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Use a pre-existing cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Attach a credential provider.
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// The node's configuration.
    pub fn parameters(&self) -> &NodeParameters {
        &self.parameters
    }

    /// Address an external party calls to resume this node.
    ///
    /// The run's resume address with the node id appended as a final path
    /// segment, so two suspended nodes of the same run never share a URL.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Validation`] if the resume address cannot carry
    /// a path (e.g. a `mailto:` URL).
    pub fn callback_url(&self) -> Result<Url, ActionError> {
        let mut url = self.resume_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ActionError::validation(format!(
                    "resume url `{}` cannot carry a path",
                    self.resume_url
                ))
            })?;
            segments.pop_if_empty().push(&self.node_id.to_string());
        }
        Ok(url)
    }

    /// Check whether execution has been cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Cancelled`] if the token has been triggered.
    pub fn check_cancelled(&self) -> Result<(), ActionError> {
        if self.cancellation.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Retrieve a credential value by key.
    ///
    /// Returns an error if no credential provider is configured.
    pub async fn credential(&self, key: &str) -> Result<SecureString, ActionError> {
        match &self.credentials {
            Some(provider) => provider.get(key).await,
            None => Err(ActionError::fatal("no credential provider configured")),
        }
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("execution_id", &self.execution_id)
            .field("node_id", &self.node_id)
            .field("workflow_id", &self.workflow_id)
            .field("resume_url", &self.resume_url.as_str())
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}
