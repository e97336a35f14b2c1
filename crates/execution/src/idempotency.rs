//! One-shot wait keys and exactly-once resume tracking.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tollgate_core::{ExecutionId, NodeId};

/// Correlates an inbound callback with one parked node of one run.
///
/// Stable across suspend and resume: the node id is the same in both
/// invocations, and a run never parks the same node twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaitKey {
    /// Run the node belongs to.
    pub execution_id: ExecutionId,
    /// Parked node.
    pub node_id: NodeId,
}

impl WaitKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(execution_id: ExecutionId, node_id: NodeId) -> Self {
        Self {
            execution_id,
            node_id,
        }
    }
}

impl fmt::Display for WaitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.execution_id, self.node_id)
    }
}

/// How long a resumed key is remembered by default.
pub const DEFAULT_RESUME_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

/// Remembers which wait keys have been resumed to completion.
///
/// Lets the host answer a late duplicate callback with "already resumed"
/// instead of "unknown run". Entries older than the retention window are
/// dropped by [`prune`](Self::prune); after that a duplicate is answered as
/// an unknown run. Safe to share between tasks.
#[derive(Debug)]
pub struct ResumeLedger {
    resumed: DashMap<WaitKey, DateTime<Utc>>,
    retention: Duration,
}

impl Default for ResumeLedger {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RESUME_RETENTION)
    }
}

impl ResumeLedger {
    /// Create a new empty ledger with the default retention.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty ledger remembering keys for `retention`.
    #[must_use]
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            resumed: DashMap::new(),
            retention,
        }
    }

    /// How long resumed keys are kept.
    #[must_use]
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Record that `key` has been resumed.
    ///
    /// Returns `true` if this is the first time the key is marked.
    pub fn mark_resumed(&self, key: WaitKey) -> bool {
        let mut first = false;
        self.resumed.entry(key).or_insert_with(|| {
            first = true;
            Utc::now()
        });
        first
    }

    /// Check if a key has been resumed.
    #[must_use]
    pub fn is_resumed(&self, key: &WaitKey) -> bool {
        self.resumed.contains_key(key)
    }

    /// When the key was resumed, if it was.
    #[must_use]
    pub fn resumed_at(&self, key: &WaitKey) -> Option<DateTime<Utc>> {
        self.resumed.get(key).map(|entry| *entry.value())
    }

    /// Forget keys resumed at or before `now - retention`.
    ///
    /// Returns the number of evicted keys.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = TimeDelta::from_std(self.retention)
            .ok()
            .and_then(|retention| now.checked_sub_signed(retention))
        else {
            return 0;
        };
        let mut evicted = 0;
        self.resumed.retain(|_, resumed_at| {
            let keep = *resumed_at > cutoff;
            if !keep {
                evicted += 1;
            }
            keep
        });
        evicted
    }

    /// Number of tracked keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resumed.len()
    }

    /// Returns `true` if no keys are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resumed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let exec_id = ExecutionId::v4();
        let node_id = NodeId::v4();
        assert_eq!(WaitKey::new(exec_id, node_id), WaitKey::new(exec_id, node_id));
    }

    #[test]
    fn different_nodes_different_keys() {
        let exec_id = ExecutionId::v4();
        assert_ne!(
            WaitKey::new(exec_id, NodeId::v4()),
            WaitKey::new(exec_id, NodeId::v4())
        );
    }

    #[test]
    fn key_display() {
        let exec_id = ExecutionId::v4();
        let node_id = NodeId::v4();
        let key = WaitKey::new(exec_id, node_id);
        assert_eq!(key.to_string(), format!("{exec_id}:{node_id}"));
    }

    #[test]
    fn mark_resumed_once() {
        let ledger = ResumeLedger::new();
        let key = WaitKey::new(ExecutionId::v4(), NodeId::v4());
        assert!(!ledger.is_resumed(&key));
        assert!(ledger.mark_resumed(key)); // first time
        assert!(!ledger.mark_resumed(key)); // duplicate
        assert!(ledger.is_resumed(&key));
        assert!(ledger.resumed_at(&key).is_some());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn prune_evicts_expired_keys() {
        let ledger = ResumeLedger::with_retention(Duration::from_secs(60));
        let key = WaitKey::new(ExecutionId::v4(), NodeId::v4());
        ledger.mark_resumed(key);

        assert_eq!(ledger.prune(Utc::now()), 0);
        assert!(ledger.is_resumed(&key));

        assert_eq!(ledger.prune(Utc::now() + TimeDelta::hours(1)), 1);
        assert!(!ledger.is_resumed(&key));
        assert!(ledger.is_empty());
    }

    #[test]
    fn prune_boundary_is_inclusive() {
        let ledger = ResumeLedger::new();
        let key = WaitKey::new(ExecutionId::v4(), NodeId::v4());
        ledger.mark_resumed(key);
        let expires = ledger.resumed_at(&key).unwrap() + TimeDelta::hours(24);

        assert_eq!(ledger.retention(), DEFAULT_RESUME_RETENTION);
        assert_eq!(ledger.prune(expires - TimeDelta::seconds(1)), 0);
        assert!(ledger.is_resumed(&key));
        assert_eq!(ledger.prune(expires), 1);
        assert!(!ledger.is_resumed(&key));
    }

    #[test]
    fn empty_ledger() {
        let ledger = ResumeLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.resumed_at(&WaitKey::new(ExecutionId::v4(), NodeId::v4())).is_none());
    }
}
