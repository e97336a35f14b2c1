//! # Tollgate Action System
//!
//! Execution contract between workflow nodes and the engine that hosts them.
//!
//! This crate defines **what** a node is and **how it talks** to the engine,
//! but not how the engine parks or schedules runs. Nodes that pause for an
//! external party implement [`InteractiveAction`]: a `start` entry point that
//! returns [`ActionResult::Wait`], and a `resume` entry point that receives the
//! inbound [`WebhookCallback`] once the external party answers.
//!
//! ## Core Types
//!
//! - [`Action`]: base trait providing identity and metadata
//! - [`InteractiveAction`]: suspend on start, resume on webhook callback
//! - [`ActionResult`]: execution result carrying data and flow-control intent
//! - [`NodeOutputs`]: positional per-port record sets handed back to the engine
//! - [`Item`]: one record flowing between nodes, with provenance
//! - [`NodeParameters`]: read-only node configuration
//! - [`ActionContext`]: runtime context with IDs, resume address, cancellation
//! - [`ActionError`]: fatal failures, validation errors, and cancellation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tollgate_action::prelude::*;
//! use async_trait::async_trait;
//!
//! struct WaitForPing { meta: ActionMetadata }
//!
//! impl Action for WaitForPing {
//!     fn metadata(&self) -> &ActionMetadata { &self.meta }
//! }
//!
//! #[async_trait]
//! impl InteractiveAction for WaitForPing {
//!     async fn start(
//!         &self,
//!         input: Vec<Item>,
//!         ctx: &ActionContext,
//!     ) -> Result<ActionResult<Vec<Item>>, ActionError> {
//!         Ok(ActionResult::wait_for_webhook(ctx.callback_url()?, input))
//!     }
//!
//!     async fn resume(
//!         &self,
//!         callback: WebhookCallback,
//!         _ctx: &ActionContext,
//!     ) -> Result<WebhookResponse, ActionError> {
//!         let item = Item::new(callback.payload()).with_paired_item(0);
//!         Ok(WebhookResponse::ok(ActionResult::success(vec![item])))
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Base action trait defining identity and metadata.
pub mod action;
/// Runtime context provided to actions during execution.
pub mod context;
/// Action error type.
pub mod error;
/// Records flowing between nodes.
pub mod item;
/// Static metadata describing an action type.
pub mod metadata;
/// Positional per-port output sets.
pub mod output;
/// Read-only node configuration.
pub mod parameters;
/// Output port declarations.
pub mod port;
/// Convenience re-exports for action authors.
pub mod prelude;
/// Dependency-injection port traits (credentials).
pub mod provider;
/// Execution result types carrying data and flow-control intent.
pub mod result;
/// Inbound webhook callbacks and their acknowledgements.
pub mod webhook;
mod types;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use action::Action;
pub use context::ActionContext;
pub use error::ActionError;
pub use item::{Item, JsonObject, PairedItem};
pub use metadata::ActionMetadata;
pub use output::NodeOutputs;
pub use parameters::NodeParameters;
pub use port::{OutputPort, PortKey};
pub use provider::{CredentialProvider, SecureString};
pub use result::{ActionResult, WaitCondition};
pub use types::InteractiveAction;
pub use webhook::{WEBHOOK_ACKNOWLEDGEMENT, WebhookCallback, WebhookResponse};
