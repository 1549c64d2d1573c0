//! Lifecycle of the frontier "generate" transition.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Status of the most recent question generation for a session.
///
/// `Pending` doubles as the in-flight guard: while it holds, forward and
/// back navigation are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl GenerationStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, GenerationStatus::Pending)
    }
}

impl StateMachine for GenerationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GenerationStatus::*;
        matches!(
            (self, target),
            (Idle, Pending)
                | (Succeeded, Pending)
                | (Failed, Pending)
                | (Pending, Succeeded)
                | (Pending, Failed)
                // request future dropped before the result arrived
                | (Pending, Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GenerationStatus::*;

    #[test]
    fn only_pending_is_in_flight() {
        assert!(Pending.is_in_flight());
        assert!(!Idle.is_in_flight());
        assert!(!Succeeded.is_in_flight());
        assert!(!Failed.is_in_flight());
    }

    #[test]
    fn request_can_start_from_any_settled_state() {
        for from in [Idle, Succeeded, Failed] {
            assert_eq!(from.transition_to(Pending), Ok(Pending));
        }
    }

    #[test]
    fn cannot_start_a_second_request_while_pending() {
        assert!(Pending.transition_to(Pending).is_err());
    }

    #[test]
    fn results_only_settle_a_pending_request() {
        assert!(Idle.transition_to(Succeeded).is_err());
        assert!(Failed.transition_to(Succeeded).is_err());
        assert_eq!(Pending.transition_to(Failed), Ok(Failed));
    }
}
