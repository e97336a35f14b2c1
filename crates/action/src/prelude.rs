//! Convenience re-exports for action authors.
//!
//! ```rust,ignore
//! use tollgate_action::prelude::*;
//! ```

pub use crate::action::Action;
pub use crate::context::ActionContext;
pub use crate::error::ActionError;
pub use crate::item::{Item, JsonObject, PairedItem};
pub use crate::metadata::ActionMetadata;
pub use crate::output::NodeOutputs;
pub use crate::parameters::NodeParameters;
pub use crate::port::OutputPort;
pub use crate::provider::{CredentialProvider, SecureString};
pub use crate::result::{ActionResult, WaitCondition};
pub use crate::types::InteractiveAction;
pub use crate::webhook::{WebhookCallback, WebhookResponse};
