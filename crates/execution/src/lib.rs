#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Tollgate Execution
//!
//! Run-level bookkeeping for suspended workflow nodes.
//!
//! This crate models execution-time concepts. It does NOT park or resume
//! anything itself. It defines:
//!
//! - [`RunStatus`]: per-node run state machine (6 states)
//! - [`ParkedRun`]: everything the host keeps about a started node
//! - [`WaitKey`]: one-shot key correlating a callback with a parked node
//! - [`ResumeLedger`]: exactly-once record of resumed keys, pruned after a retention window
//! - State machine transitions validated by the [`transition`] module

pub mod error;
pub mod idempotency;
pub mod state;
pub mod status;
pub mod transition;

pub use error::ExecutionError;
pub use idempotency::{DEFAULT_RESUME_RETENTION, ResumeLedger, WaitKey};
pub use state::ParkedRun;
pub use status::RunStatus;
