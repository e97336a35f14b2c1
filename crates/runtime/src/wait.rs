//! Registry of started and parked runs.

use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tollgate_action::Item;
use tollgate_execution::{ExecutionError, ParkedRun, ResumeLedger, RunStatus, WaitKey};
use url::Url;

/// Runs keyed by [`WaitKey`], from `start` until their outcome.
///
/// Enforces the run protocol: a key is reserved before the action is
/// started, so a second `start` for it never reaches the action; a parked
/// run is claimed by exactly one callback at a time, completes at most
/// once, and a failed resume puts it back. Every state change happens under
/// the map's shard lock for that key, so two racing calls cannot both win.
#[derive(Debug, Default)]
pub struct WaitRegistry {
    runs: DashMap<WaitKey, ParkedRun>,
    ledger: ResumeLedger,
}

impl WaitRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry remembering resumed keys for `retention`.
    #[must_use]
    pub fn with_retention(retention: Duration) -> Self {
        Self {
            runs: DashMap::new(),
            ledger: ResumeLedger::with_retention(retention),
        }
    }

    /// Register a `Running` run before its action is started.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::AlreadyResumed`] if the key has already completed
    /// - [`ExecutionError::AlreadyStarted`] if the key is held by another run
    /// - [`ExecutionError::InvalidTransition`] if `run` is not `Running`
    pub fn reserve(&self, run: ParkedRun) -> Result<(), ExecutionError> {
        let key = run.key;
        if run.status != RunStatus::Running {
            return Err(ExecutionError::invalid_transition(
                run.status,
                RunStatus::Running,
            ));
        }
        match self.runs.entry(key) {
            Entry::Occupied(_) => Err(ExecutionError::AlreadyStarted(key)),
            Entry::Vacant(_) if self.ledger.is_resumed(&key) => {
                Err(ExecutionError::AlreadyResumed(key))
            }
            Entry::Vacant(slot) => {
                slot.insert(run);
                Ok(())
            }
        }
    }

    /// Move a reserved run to `Waiting` and hand back a snapshot.
    pub fn park(
        &self,
        key: WaitKey,
        pending: Vec<Item>,
        callback_url: Url,
    ) -> Result<ParkedRun, ExecutionError> {
        let Some(mut run) = self.runs.get_mut(&key) else {
            return Err(self.missing(key));
        };
        run.park(pending, callback_url)?;
        Ok(run.clone())
    }

    /// Drop a reserved run whose `start` ended without parking.
    ///
    /// `status` is `Completed` or `Failed`. The key is free afterwards.
    pub fn finish(&self, key: WaitKey, status: RunStatus) -> Result<ParkedRun, ExecutionError> {
        let (_, mut run) = self
            .runs
            .remove_if(&key, |_, run| run.status == RunStatus::Running)
            .ok_or_else(|| match self.runs.get(&key) {
                Some(run) => ExecutionError::invalid_transition(run.status, status),
                None => self.missing(key),
            })?;
        run.transition_to(status)?;
        Ok(run)
    }

    /// Move a run from `Waiting` to `Resuming` and hand back a snapshot.
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::ResumeInProgress`] if another callback holds the run
    /// - [`ExecutionError::AlreadyResumed`] if the run has completed
    /// - [`ExecutionError::UnknownRun`] if nothing was ever parked under `key`
    pub fn claim(&self, key: WaitKey) -> Result<ParkedRun, ExecutionError> {
        let Some(mut run) = self.runs.get_mut(&key) else {
            return Err(self.missing(key));
        };
        if run.status == RunStatus::Resuming {
            return Err(ExecutionError::ResumeInProgress(key));
        }
        run.transition_to(RunStatus::Resuming)?;
        Ok(run.clone())
    }

    /// Finish a claimed run: remove it and record it as resumed.
    ///
    /// Keys resumed longer ago than the retention window are forgotten here.
    pub fn complete(&self, key: WaitKey) -> Result<ParkedRun, ExecutionError> {
        let evicted = self.ledger.prune(Utc::now());
        if evicted > 0 {
            tracing::debug!(evicted, "pruned resumed keys past retention");
        }
        match self.runs.entry(key) {
            Entry::Occupied(entry) if entry.get().status == RunStatus::Resuming => {
                self.ledger.mark_resumed(key);
                let mut run = entry.remove();
                run.transition_to(RunStatus::Completed)?;
                Ok(run)
            }
            Entry::Occupied(entry) => Err(ExecutionError::invalid_transition(
                entry.get().status,
                RunStatus::Completed,
            )),
            Entry::Vacant(_) => Err(self.missing(key)),
        }
    }

    /// Give a claimed run back so a later callback can try again.
    pub fn release(&self, key: WaitKey) -> Result<(), ExecutionError> {
        let Some(mut run) = self.runs.get_mut(&key) else {
            return Err(self.missing(key));
        };
        if run.status != RunStatus::Resuming {
            return Err(ExecutionError::invalid_transition(
                run.status,
                RunStatus::Waiting,
            ));
        }
        run.transition_to(RunStatus::Waiting)
    }

    /// Abort a waiting run. A run that is being resumed cannot be cancelled.
    pub fn cancel(&self, key: WaitKey) -> Result<ParkedRun, ExecutionError> {
        let (_, mut run) = self
            .runs
            .remove_if(&key, |_, run| run.status == RunStatus::Waiting)
            .ok_or_else(|| match self.runs.get(&key) {
                Some(run) => ExecutionError::invalid_transition(run.status, RunStatus::Cancelled),
                None => self.missing(key),
            })?;
        run.transition_to(RunStatus::Cancelled)?;
        Ok(run)
    }

    /// Snapshot of a started or parked run.
    #[must_use]
    pub fn get(&self, key: &WaitKey) -> Option<ParkedRun> {
        self.runs.get(key).map(|run| run.clone())
    }

    /// Whether a run is parked under `key`.
    #[must_use]
    pub fn contains(&self, key: &WaitKey) -> bool {
        self.runs.get(key).is_some_and(|run| run.status.is_parked())
    }

    /// Whether the run under `key` has been resumed to completion.
    #[must_use]
    pub fn is_resumed(&self, key: &WaitKey) -> bool {
        self.ledger.is_resumed(key)
    }

    /// Number of resumed keys still remembered.
    #[must_use]
    pub fn resumed_len(&self) -> usize {
        self.ledger.len()
    }

    /// Number of started or parked runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether nothing is started or parked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn missing(&self, key: WaitKey) -> ExecutionError {
        if self.ledger.is_resumed(&key) {
            ExecutionError::AlreadyResumed(key)
        } else {
            ExecutionError::UnknownRun(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_action::NodeParameters;
    use tollgate_core::{ExecutionId, NodeId, WorkflowId};

    fn run() -> ParkedRun {
        ParkedRun::running(
            WaitKey::new(ExecutionId::v4(), NodeId::v4()),
            WorkflowId::v4(),
            "test.gate",
            NodeParameters::default(),
        )
    }

    fn callback() -> Url {
        Url::parse("https://hooks.example.com/webhook-waiting/a/b").unwrap()
    }

    fn parked(waits: &WaitRegistry) -> WaitKey {
        let run = run();
        let key = run.key;
        waits.reserve(run).unwrap();
        waits.park(key, Vec::new(), callback()).unwrap();
        key
    }

    fn resumed(waits: &WaitRegistry) -> WaitKey {
        let key = parked(waits);
        waits.claim(key).unwrap();
        waits.complete(key).unwrap();
        key
    }

    // ── reserve / park / finish ──

    #[test]
    fn reserve_holds_key_without_parking() {
        let waits = WaitRegistry::new();
        let run = run();
        let key = run.key;
        waits.reserve(run).unwrap();
        assert_eq!(waits.len(), 1);
        assert_eq!(waits.get(&key).unwrap().status, RunStatus::Running);
        assert!(!waits.contains(&key));
    }

    #[test]
    fn reserve_twice_is_already_started() {
        let waits = WaitRegistry::new();
        let run = run();
        waits.reserve(run.clone()).unwrap();
        assert!(matches!(
            waits.reserve(run),
            Err(ExecutionError::AlreadyStarted(_))
        ));
    }

    #[test]
    fn reserve_while_parked_is_already_started() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        let mut again = run();
        again.key = key;
        assert!(matches!(
            waits.reserve(again),
            Err(ExecutionError::AlreadyStarted(k)) if k == key
        ));
        assert_eq!(waits.get(&key).unwrap().status, RunStatus::Waiting);
    }

    #[test]
    fn reserve_after_completion_is_rejected() {
        let waits = WaitRegistry::new();
        let key = resumed(&waits);
        let mut again = run();
        again.key = key;
        assert!(matches!(
            waits.reserve(again),
            Err(ExecutionError::AlreadyResumed(_))
        ));
        assert!(waits.is_empty());
    }

    #[test]
    fn reserve_requires_running() {
        let waits = WaitRegistry::new();
        let mut run = run();
        run.park(Vec::new(), callback()).unwrap();
        assert!(matches!(
            waits.reserve(run),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert!(waits.is_empty());
    }

    #[test]
    fn park_registers_run() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        assert!(waits.contains(&key));
        let run = waits.get(&key).unwrap();
        assert_eq!(run.status, RunStatus::Waiting);
        assert_eq!(run.callback_url, Some(callback()));
    }

    #[test]
    fn park_without_reservation_is_unknown() {
        let waits = WaitRegistry::new();
        let key = WaitKey::new(ExecutionId::v4(), NodeId::v4());
        assert!(matches!(
            waits.park(key, Vec::new(), callback()),
            Err(ExecutionError::UnknownRun(_))
        ));
    }

    #[test]
    fn finish_frees_key() {
        let waits = WaitRegistry::new();
        let run = run();
        let key = run.key;
        waits.reserve(run.clone()).unwrap();

        let failed = waits.finish(key, RunStatus::Failed).unwrap();
        assert_eq!(failed.status, RunStatus::Failed);
        assert!(waits.is_empty());
        assert!(!waits.is_resumed(&key));
        assert!(waits.reserve(run).is_ok());
    }

    #[test]
    fn finish_parked_run_is_rejected() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        assert!(matches!(
            waits.finish(key, RunStatus::Completed),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert!(waits.contains(&key));
    }

    // ── claim / complete / release ──

    #[test]
    fn claim_moves_to_resuming() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        let claimed = waits.claim(key).unwrap();
        assert_eq!(claimed.status, RunStatus::Resuming);
    }

    #[test]
    fn claim_before_parking_is_rejected() {
        let waits = WaitRegistry::new();
        let run = run();
        let key = run.key;
        waits.reserve(run).unwrap();
        assert!(matches!(
            waits.claim(key),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert_eq!(waits.get(&key).unwrap().status, RunStatus::Running);
    }

    #[test]
    fn second_claim_is_in_progress() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        waits.claim(key).unwrap();
        assert!(matches!(
            waits.claim(key),
            Err(ExecutionError::ResumeInProgress(_))
        ));
    }

    #[test]
    fn complete_removes_and_records() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        waits.claim(key).unwrap();
        let done = waits.complete(key).unwrap();
        assert_eq!(done.status, RunStatus::Completed);
        assert!(waits.is_empty());
        assert!(waits.is_resumed(&key));
        assert!(matches!(
            waits.claim(key),
            Err(ExecutionError::AlreadyResumed(_))
        ));
    }

    #[test]
    fn complete_requires_claim() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        assert!(matches!(
            waits.complete(key),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert!(waits.contains(&key));
    }

    #[test]
    fn complete_forgets_keys_past_retention() {
        let waits = WaitRegistry::with_retention(Duration::ZERO);
        let first = resumed(&waits);
        assert!(waits.is_resumed(&first));

        let second = resumed(&waits);
        assert!(!waits.is_resumed(&first));
        assert!(waits.is_resumed(&second));
        assert_eq!(waits.resumed_len(), 1);
        assert!(matches!(
            waits.claim(first),
            Err(ExecutionError::UnknownRun(_))
        ));
    }

    #[test]
    fn default_retention_keeps_resumed_keys() {
        let waits = WaitRegistry::new();
        let first = resumed(&waits);
        let second = resumed(&waits);
        assert!(waits.is_resumed(&first));
        assert!(waits.is_resumed(&second));
        assert_eq!(waits.resumed_len(), 2);
    }

    #[test]
    fn release_allows_reclaim() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        waits.claim(key).unwrap();
        waits.release(key).unwrap();
        assert_eq!(waits.get(&key).unwrap().status, RunStatus::Waiting);
        assert!(waits.claim(key).is_ok());
    }

    #[test]
    fn release_requires_claim() {
        let waits = WaitRegistry::new();
        let run = run();
        let key = run.key;
        waits.reserve(run).unwrap();
        assert!(matches!(
            waits.release(key),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert_eq!(waits.get(&key).unwrap().status, RunStatus::Running);
    }

    #[test]
    fn claim_unknown_key() {
        let waits = WaitRegistry::new();
        let key = WaitKey::new(ExecutionId::v4(), NodeId::v4());
        assert!(matches!(waits.claim(key), Err(ExecutionError::UnknownRun(_))));
    }

    // ── cancel ──

    #[test]
    fn cancel_waiting_run() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        let cancelled = waits.cancel(key).unwrap();
        assert_eq!(cancelled.status, RunStatus::Cancelled);
        assert!(!waits.contains(&key));
        assert!(!waits.is_resumed(&key));
    }

    #[test]
    fn cancel_resuming_run_is_rejected() {
        let waits = WaitRegistry::new();
        let key = parked(&waits);
        waits.claim(key).unwrap();
        assert!(matches!(
            waits.cancel(key),
            Err(ExecutionError::InvalidTransition { .. })
        ));
        assert!(waits.contains(&key));
    }
}
