#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Tollgate Approval
//!
//! The send-and-wait approval node.
//!
//! A configured node declares a list of named actions (`Approve`, `Decline`,
//! ...). Each action becomes one output lane. When a run reaches the node it
//! sends an [`ApprovalRequest`] carrying a callback address and parks. When
//! the external party calls back with `{"action": "<name>", ...}`, the payload
//! is forwarded on exactly one lane and every other lane stays empty.
//!
//! - [`resolve_lanes`]: configuration → ordered lanes, no run required
//! - [`ApprovalNode`]: the [`InteractiveAction`](tollgate_action::InteractiveAction)
//! - [`LaneMatch`]: first-match lookup of a callback's action
//! - [`ApprovalNotifier`]: where approval requests go
//!
//! ## Concurrent callbacks
//!
//! The node keeps no state between `start` and `resume`, so it cannot tell a
//! first callback from a second one. Deciding which callback wins is the
//! host's job; `tollgate-runtime` accepts the first claim and rejects the rest.

pub mod dispatch;
pub mod error;
pub mod node;
pub mod notify;
pub mod parameters;
pub mod request;
pub mod topology;

pub use dispatch::{LaneMatch, requested_action};
pub use error::ApprovalError;
pub use node::{ACCOUNT_ID_CREDENTIAL, APPROVAL_ACTION_KEY, ApprovalNode};
pub use notify::{ApprovalNotifier, ChannelNotifier, HttpNotifier};
pub use parameters::{ActionDefinition, ApprovalParameters};
pub use request::ApprovalRequest;
pub use topology::{Lane, resolve_lanes};
