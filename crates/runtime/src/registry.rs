//! Action registry for looking up actions by key.

use std::sync::Arc;

use dashmap::DashMap;
use tollgate_action::InteractiveAction;

use crate::error::RuntimeError;

/// Thread-safe registry of actions.
///
/// Actions are registered by metadata key (e.g. `"approval.send_and_wait"`)
/// and looked up both when a run starts and when it resumes. Uses `DashMap`
/// for lock-free concurrent access.
///
/// # Examples
///
/// ```rust,ignore
/// use tollgate_runtime::ActionRegistry;
///
/// let registry = ActionRegistry::new();
/// registry.register(Arc::new(my_action));
/// let action = registry.get("approval.send_and_wait")?;
/// ```
pub struct ActionRegistry {
    actions: DashMap<String, Arc<dyn InteractiveAction>>,
}

impl ActionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: DashMap::new(),
        }
    }

    /// Register an action.
    ///
    /// If an action with the same key already exists, it is replaced.
    pub fn register(&self, action: Arc<dyn InteractiveAction>) {
        let key = action.metadata().key.clone();
        tracing::info!(action_key = %key, "registered action");
        self.actions.insert(key, action);
    }

    /// Look up an action by key.
    pub fn get(&self, key: &str) -> Result<Arc<dyn InteractiveAction>, RuntimeError> {
        self.actions
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RuntimeError::ActionNotFound {
                key: key.to_owned(),
            })
    }

    /// Check if an action is registered for the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.actions.contains_key(key)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// List all registered action keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.actions.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
