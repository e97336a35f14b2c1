use chrono::{DateTime, Utc};
use http::{HeaderMap, Method};

use crate::item::{Item, JsonObject};
use crate::result::ActionResult;

/// Acknowledgement returned to a caller whose callback was accepted.
pub const WEBHOOK_ACKNOWLEDGEMENT: &str = "OK";

/// An inbound HTTP callback addressed to a suspended node.
///
/// The transport layer owns parsing; by the time an action sees a callback
/// the body has already been decoded as JSON.
#[derive(Debug, Clone)]
pub struct WebhookCallback {
    /// HTTP method of the inbound request.
    pub method: Method,
    /// Request headers.
    pub headers: HeaderMap,
    /// Decoded request body.
    pub body: serde_json::Value,
    /// When the transport accepted the request.
    pub received_at: DateTime<Utc>,
}

impl WebhookCallback {
    /// Create a callback received now.
    pub fn new(method: Method, body: serde_json::Value) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body,
            received_at: Utc::now(),
        }
    }

    /// Shorthand for a `POST` callback.
    pub fn post(body: serde_json::Value) -> Self {
        Self::new(Method::POST, body)
    }

    /// The body as a JSON object.
    ///
    /// A body that is not an object (a bare string, a list, `null`) carries no
    /// named fields and reads as an empty object.
    pub fn payload(&self) -> JsonObject {
        self.body.as_object().cloned().unwrap_or_default()
    }
}

/// What a resumed action hands back to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    /// Text returned to the external caller.
    pub acknowledgement: String,
    /// Outcome forwarded to the workflow.
    pub result: ActionResult<Vec<Item>>,
}

impl WebhookResponse {
    /// Accept the callback with the standard acknowledgement.
    pub fn ok(result: ActionResult<Vec<Item>>) -> Self {
        Self {
            acknowledgement: WEBHOOK_ACKNOWLEDGEMENT.to_owned(),
            result,
        }
    }
}
