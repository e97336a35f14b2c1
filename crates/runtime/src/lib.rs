#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Tollgate Runtime
//!
//! In-process host for suspend/resume actions.
//!
//! This crate provides:
//! - [`ActionRuntime`]: starts actions, parks the ones that wait, resumes them
//!   on callback, and converts their results into positional outputs
//! - [`ActionRegistry`]: registers and looks up actions by key
//! - [`WaitRegistry`]: started and parked runs, with exactly-once claiming
//! - [`StaticCredentials`]: in-memory credential provider
//! - [`RuntimeConfig`]: where callback addresses are rooted
//!
//! The runtime is the "pause/resume a unit of work" primitive actions are
//! written against. It owns no transport: whoever receives the HTTP callback
//! hands it to [`ActionRuntime::resume`] together with the run's wait key.

pub mod config;
pub mod credentials;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod wait;

pub use config::RuntimeConfig;
pub use credentials::StaticCredentials;
pub use error::RuntimeError;
pub use registry::ActionRegistry;
pub use runtime::{ActionRuntime, ResumeOutcome, StartOutcome, StartRequest};
pub use wait::WaitRegistry;
