//! Outbound approval request.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::parameters::{ActionDefinition, ApprovalParameters};

/// The outbound message asking an external party to choose an action.
///
/// Built once per run and handed to an
/// [`ApprovalNotifier`](crate::ApprovalNotifier). Serialized in camelCase,
/// which is also the wire body of [`HttpNotifier`](crate::HttpNotifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Where the chosen action must be posted.
    pub callback_address: Url,
    /// Available choices, in lane order.
    pub actions: Vec<ActionDefinition>,
    /// Sending account.
    pub account_id: String,
}

impl ApprovalRequest {
    /// Assemble a request from the node's configuration.
    pub fn new(
        parameters: ApprovalParameters,
        callback_address: Url,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            subject: parameters.subject,
            message: parameters.message,
            callback_address,
            actions: parameters.actions,
            account_id: account_id.into(),
        }
    }
}
