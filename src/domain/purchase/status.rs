//! Purchase status state machine.
//!
//! A purchase is created pending when a checkout session starts and is
//! settled exactly once by a verified gateway event.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a course purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Checkout session created, awaiting the gateway's verdict.
    Pending,

    /// Payment captured. The buyer is enrolled.
    Completed,

    /// Payment failed or the session expired.
    Failed,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
        }
    }
}

impl StateMachine for PurchaseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PurchaseStatus::*;
        matches!((self, target), (Pending, Completed) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PurchaseStatus::*;
        match self {
            Pending => vec![Completed, Failed],
            Completed | Failed => vec![],
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PurchaseStatus::Pending),
            "completed" => Ok(PurchaseStatus::Completed),
            "failed" => Ok(PurchaseStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown purchase status '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pending_can_complete() {
        assert_eq!(
            PurchaseStatus::Pending.transition_to(PurchaseStatus::Completed),
            Ok(PurchaseStatus::Completed)
        );
    }

    #[test]
    fn pending_can_fail() {
        assert_eq!(
            PurchaseStatus::Pending.transition_to(PurchaseStatus::Failed),
            Ok(PurchaseStatus::Failed)
        );
    }

    #[test]
    fn completed_cannot_fail() {
        assert!(PurchaseStatus::Completed
            .transition_to(PurchaseStatus::Failed)
            .is_err());
    }

    #[test]
    fn failed_cannot_complete() {
        assert!(PurchaseStatus::Failed
            .transition_to(PurchaseStatus::Completed)
            .is_err());
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!PurchaseStatus::Pending.is_terminal());
        assert!(PurchaseStatus::Completed.is_terminal());
        assert!(PurchaseStatus::Failed.is_terminal());
    }

    #[test]
    fn round_trips_through_storage_string() {
        for status in [
            PurchaseStatus::Pending,
            PurchaseStatus::Completed,
            PurchaseStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<PurchaseStatus>(), Ok(status));
        }
        assert!("refunded".parse::<PurchaseStatus>().is_err());
    }

    fn any_status() -> impl Strategy<Value = PurchaseStatus> {
        prop_oneof![
            Just(PurchaseStatus::Pending),
            Just(PurchaseStatus::Completed),
            Just(PurchaseStatus::Failed),
        ]
    }

    proptest! {
        #[test]
        fn terminal_states_accept_no_transition(from in any_status(), to in any_status()) {
            if from.is_terminal() {
                prop_assert!(from.transition_to(to).is_err());
            }
        }

        #[test]
        fn can_transition_agrees_with_valid_transitions(from in any_status(), to in any_status()) {
            prop_assert_eq!(
                from.can_transition_to(&to),
                from.valid_transitions().contains(&to)
            );
        }

        #[test]
        fn every_event_sequence_settles_at_most_once(targets in proptest::collection::vec(any_status(), 0..8)) {
            let mut status = PurchaseStatus::Pending;
            let mut changes = 0;
            for target in targets {
                if let Ok(next) = status.transition_to(target) {
                    status = next;
                    changes += 1;
                }
            }
            prop_assert!(changes <= 1);
        }
    }
}
