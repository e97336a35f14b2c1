#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Tollgate Log
//!
//! One-call `tracing` setup for Tollgate binaries.
//!
//! ```rust,ignore
//! let _guard = tollgate_log::init()?;                       // from environment
//! let _guard = tollgate_log::init_with(Config::production())?;
//! ```
//!
//! Library crates never initialise logging; they only emit `tracing` events.

pub mod builder;
pub mod config;
pub mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Initialise the global subscriber from `TOLLGATE_LOG` / `RUST_LOG` and
/// `TOLLGATE_LOG_FORMAT`.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initialise the global subscriber from an explicit configuration.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
