//! State machine transition validation for node runs.

use crate::error::ExecutionError;
use crate::status::RunStatus;

/// Returns `true` if the transition from `from` to `to` is valid.
///
/// A failed `resume` sends the run from `Resuming` back to `Waiting` so the
/// external party can call again.
#[must_use]
pub fn can_transition(from: RunStatus, to: RunStatus) -> bool {
    matches!(
        (from, to),
        (RunStatus::Running, RunStatus::Waiting)
            | (RunStatus::Running, RunStatus::Completed)
            | (RunStatus::Running, RunStatus::Failed)
            | (RunStatus::Waiting, RunStatus::Resuming)
            | (RunStatus::Waiting, RunStatus::Cancelled)
            | (RunStatus::Resuming, RunStatus::Completed)
            | (RunStatus::Resuming, RunStatus::Waiting)
    )
}

/// Validate a transition, returning an error if invalid.
pub fn validate_transition(from: RunStatus, to: RunStatus) -> Result<(), ExecutionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(ExecutionError::invalid_transition(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RunStatus::Running, RunStatus::Waiting)]
    #[case(RunStatus::Running, RunStatus::Completed)]
    #[case(RunStatus::Running, RunStatus::Failed)]
    #[case(RunStatus::Waiting, RunStatus::Resuming)]
    #[case(RunStatus::Waiting, RunStatus::Cancelled)]
    #[case(RunStatus::Resuming, RunStatus::Completed)]
    #[case(RunStatus::Resuming, RunStatus::Waiting)]
    fn valid_transitions(#[case] from: RunStatus, #[case] to: RunStatus) {
        assert!(can_transition(from, to));
        assert!(validate_transition(from, to).is_ok());
    }

    #[rstest]
    #[case(RunStatus::Waiting, RunStatus::Completed)]
    #[case(RunStatus::Waiting, RunStatus::Waiting)]
    #[case(RunStatus::Resuming, RunStatus::Resuming)]
    #[case(RunStatus::Resuming, RunStatus::Cancelled)]
    #[case(RunStatus::Completed, RunStatus::Resuming)]
    #[case(RunStatus::Cancelled, RunStatus::Waiting)]
    #[case(RunStatus::Failed, RunStatus::Running)]
    fn invalid_transitions(#[case] from: RunStatus, #[case] to: RunStatus) {
        assert!(!can_transition(from, to));
    }

    #[test]
    fn validate_transition_err() {
        let err = validate_transition(RunStatus::Completed, RunStatus::Resuming).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid transition from completed to resuming"
        );
    }
}
