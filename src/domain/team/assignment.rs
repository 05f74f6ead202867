//! Assignment status state machine
//!
//! A freshly created team is `Pending` until its supervisor accepts or
//! refuses the assignment. Both outcomes are terminal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for an illegal assignment-status transition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Only pending assignments can be {action}; current status is '{current}'")]
    NotPending {
        current: AssignmentStatus,
        action: &'static str,
    },

    #[error("An assignment cannot return to pending")]
    TargetPending,
}

/// Status of the team-supervisor assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Awaiting the supervisor's decision
    #[default]
    Pending,
    /// Supervisor accepted the team (terminal)
    Accepted,
    /// Supervisor refused the team (terminal)
    Refused,
}

impl AssignmentStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Attempt to move from the current status to `target`.
    ///
    /// Only `Pending -> Accepted` and `Pending -> Refused` are legal.
    pub fn transition(self, target: AssignmentStatus) -> Result<AssignmentStatus, TransitionError> {
        match target {
            AssignmentStatus::Pending => Err(TransitionError::TargetPending),
            AssignmentStatus::Accepted | AssignmentStatus::Refused => {
                if self.is_pending() {
                    Ok(target)
                } else {
                    Err(TransitionError::NotPending {
                        current: self,
                        action: if target == AssignmentStatus::Accepted {
                            "accepted"
                        } else {
                            "refused"
                        },
                    })
                }
            }
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Refused => write!(f, "refused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts() {
        assert_eq!(
            AssignmentStatus::Pending.transition(AssignmentStatus::Accepted),
            Ok(AssignmentStatus::Accepted)
        );
    }

    #[test]
    fn test_pending_refuses() {
        assert_eq!(
            AssignmentStatus::Pending.transition(AssignmentStatus::Refused),
            Ok(AssignmentStatus::Refused)
        );
    }

    #[test]
    fn test_accepted_is_terminal() {
        assert!(
            AssignmentStatus::Accepted
                .transition(AssignmentStatus::Accepted)
                .is_err()
        );
        assert!(
            AssignmentStatus::Accepted
                .transition(AssignmentStatus::Refused)
                .is_err()
        );
    }

    #[test]
    fn test_refused_is_terminal() {
        assert!(
            AssignmentStatus::Refused
                .transition(AssignmentStatus::Accepted)
                .is_err()
        );
        assert!(
            AssignmentStatus::Refused
                .transition(AssignmentStatus::Refused)
                .is_err()
        );
    }

    #[test]
    fn test_no_transition_back_to_pending() {
        for current in [
            AssignmentStatus::Pending,
            AssignmentStatus::Accepted,
            AssignmentStatus::Refused,
        ] {
            assert_eq!(
                current.transition(AssignmentStatus::Pending),
                Err(TransitionError::TargetPending)
            );
        }
    }

    #[test]
    fn test_default_is_pending() {
        assert!(AssignmentStatus::default().is_pending());
    }
}
