//! Logging setup errors.

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The level / directive string is not a valid filter.
    #[error("invalid filter `{directive}`: {reason}")]
    Filter {
        /// The rejected directive string.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A format name is not one of `pretty`, `compact`, `json`.
    #[error("unknown log format `{0}`")]
    UnknownFormat(String),

    /// A global subscriber is already installed.
    #[error("logger already initialised: {0}")]
    AlreadyInitialized(String),
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
