//! # Tollgate Core
//!
//! Core types shared by every Tollgate crate.
//!
//! ## Key Components
//!
//! - **Identifiers**: [`ExecutionId`], [`WorkflowId`], [`NodeId`]
//!
//! ## Usage
//!
//! ```rust
//! use tollgate_core::{ExecutionId, NodeId, WorkflowId};
//!
//! let execution_id = ExecutionId::v4();
//! let workflow_id = WorkflowId::v4();
//! let node_id = NodeId::v4();
//! assert!(!node_id.is_nil());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod id;

pub use id::*;
