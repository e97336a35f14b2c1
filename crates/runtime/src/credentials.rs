//! In-memory credential provider.

use async_trait::async_trait;
use dashmap::DashMap;
use tollgate_action::{ActionError, CredentialProvider, SecureString};

/// Credential provider backed by a fixed in-memory map.
///
/// Suitable for single-tenant hosts and tests. Values never appear in
/// `Debug` output.
#[derive(Default)]
pub struct StaticCredentials {
    values: DashMap<String, SecureString>,
}

impl StaticCredentials {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a credential.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), SecureString::new(value));
    }

    /// Number of stored credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no credentials are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("count", &self.values.len())
            .finish()
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get(&self, key: &str) -> Result<SecureString, ActionError> {
        self.values
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ActionError::fatal(format!("credential `{key}` is not configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_stored_value() {
        let creds = StaticCredentials::new().with("account_id", "acct-7");
        assert_eq!(creds.get("account_id").await.unwrap().expose(), "acct-7");
        assert_eq!(creds.len(), 1);
    }

    #[tokio::test]
    async fn missing_key_is_fatal() {
        let creds = StaticCredentials::new();
        let err = creds.get("account_id").await.unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("`account_id`"));
    }

    #[test]
    fn debug_hides_values() {
        let creds = StaticCredentials::new().with("account_id", "acct-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("acct-secret"));
        assert!(debug.contains("count"));
    }
}
