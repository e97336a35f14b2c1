//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tollgate_core::ExecutionId;
use tollgate_execution::DEFAULT_RESUME_RETENTION;
use url::Url;

use crate::error::RuntimeError;

/// Path segment under which resumable runs are addressed.
pub const WEBHOOK_WAITING_SEGMENT: &str = "webhook-waiting";

/// Public address used when nothing else is configured.
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:5678";

/// Settings for an [`ActionRuntime`](crate::ActionRuntime).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Externally reachable base address of this host.
    pub public_url: Url,
    /// How long a resumed key keeps answering duplicates with "already resumed".
    #[serde(default = "default_resume_retention")]
    pub resume_retention: Duration,
}

const fn default_resume_retention() -> Duration {
    DEFAULT_RESUME_RETENTION
}

impl RuntimeConfig {
    /// Create a config rooted at `public_url`.
    pub fn new(public_url: Url) -> Self {
        Self {
            public_url,
            resume_retention: DEFAULT_RESUME_RETENTION,
        }
    }

    /// Remember resumed keys for `retention`.
    #[must_use]
    pub fn with_resume_retention(mut self, retention: Duration) -> Self {
        self.resume_retention = retention;
        self
    }

    /// Parse the public address from a string.
    pub fn from_public_url(public_url: &str) -> Result<Self, RuntimeError> {
        Url::parse(public_url)
            .map(Self::new)
            .map_err(|e| RuntimeError::InvalidUrl(format!("{public_url}: {e}")))
    }

    /// Resumable base address of one run: `{public_url}/webhook-waiting/{execution_id}`.
    pub fn resume_url(&self, execution_id: ExecutionId) -> Result<Url, RuntimeError> {
        let mut url = self.public_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RuntimeError::InvalidUrl(format!("{} cannot be a base", self.public_url))
            })?
            .pop_if_empty()
            .push(WEBHOOK_WAITING_SEGMENT)
            .push(&execution_id.to_string());
        Ok(url)
    }
}
