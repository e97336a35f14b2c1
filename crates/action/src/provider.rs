//! Dependency-injection port traits.
//!
//! The runtime implements these to hand services to actions without
//! coupling actions to a concrete backend.

use std::fmt;

use async_trait::async_trait;

use crate::error::ActionError;

/// A string that redacts its contents in Debug and Display.
///
/// Used for credential values to prevent accidental logging.
#[derive(Clone)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Access the underlying value.
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Port trait for providing credentials to actions.
///
/// Implemented by the runtime to inject credential resolution into actions
/// without coupling them to the credential storage backend.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Retrieve a credential value by key.
    async fn get(&self, key: &str) -> Result<SecureString, ActionError>;
}
