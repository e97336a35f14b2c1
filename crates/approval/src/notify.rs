//! Outbound notification collaborators.
//!
//! Delivery is fire-and-forget: the node never waits on it, never learns
//! whether it succeeded, and never retries it.

use tokio::sync::mpsc;
use url::Url;

use crate::request::ApprovalRequest;

/// Where approval requests are sent.
pub trait ApprovalNotifier: Send + Sync {
    /// Hand a request over for delivery. Must not block.
    fn notify(&self, request: ApprovalRequest);
}

/// Forwards requests to an in-process consumer.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<ApprovalRequest>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ApprovalRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ApprovalNotifier for ChannelNotifier {
    fn notify(&self, request: ApprovalRequest) {
        if self.tx.send(request).is_err() {
            tracing::warn!("approval request dropped: receiver closed");
        }
    }
}

/// POSTs requests as JSON to a fixed endpoint.
///
/// Each request is sent on its own task. Failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpNotifier {
    /// Create a notifier with a default client.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Use a preconfigured client (timeouts, proxies, default headers).
    #[must_use]
    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Target endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ApprovalNotifier for HttpNotifier {
    fn notify(&self, request: ApprovalRequest) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            match http.post(endpoint.clone()).json(&request).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(
                        endpoint = %endpoint,
                        callback = %request.callback_address,
                        "approval request delivered"
                    );
                }
                Ok(resp) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        status = %resp.status(),
                        "approval request rejected"
                    );
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "approval request failed");
                }
            }
        });
    }
}
