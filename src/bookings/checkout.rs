use crate::bookings::models::CheckoutState;

/// Service for managing checkout session state transitions
///
/// One machine instance per checkout session; the state value itself lives
/// in per-session storage between requests.
pub struct CheckoutMachine;

impl CheckoutMachine {
    /// Check if a state transition is valid
    ///
    /// # Valid Transitions
    /// - SelectingShowtime → SelectingSeats (showtime resolved)
    /// - SelectingSeats → Reviewing (seats proposed, priced)
    /// - Reviewing → Committed (booking persisted)
    /// - Reviewing → SelectingSeats (re-pick after a failed commit)
    /// - Any non-terminal state → Same state (idempotent)
    /// - Committed → (terminal; nothing out, not even Committed — a second
    ///   commit would double-book)
    pub fn is_valid_transition(from: CheckoutState, to: CheckoutState) -> bool {
        // Same state is idempotent, except for the terminal state
        if from == to {
            return from != CheckoutState::Committed;
        }

        match (from, to) {
            (CheckoutState::SelectingShowtime, CheckoutState::SelectingSeats) => true,
            (CheckoutState::SelectingSeats, CheckoutState::Reviewing) => true,
            (CheckoutState::Reviewing, CheckoutState::Committed) => true,

            // A failed commit sends the user back to seat selection
            (CheckoutState::Reviewing, CheckoutState::SelectingSeats) => true,

            // Committed is terminal; a fresh checkout is a new machine
            (CheckoutState::Committed, _) => false,

            _ => false,
        }
    }

    /// Attempt to transition from one state to another
    ///
    /// Returns `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(from: CheckoutState, to: CheckoutState) -> Result<CheckoutState, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid checkout transition from {} to {}", from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_showtime_to_selecting_seats() {
        assert!(CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingShowtime,
            CheckoutState::SelectingSeats
        ));
    }

    #[test]
    fn test_selecting_seats_to_reviewing() {
        assert!(CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingSeats,
            CheckoutState::Reviewing
        ));
    }

    #[test]
    fn test_reviewing_to_committed() {
        assert!(CheckoutMachine::is_valid_transition(
            CheckoutState::Reviewing,
            CheckoutState::Committed
        ));
    }

    #[test]
    fn test_reviewing_back_to_selecting_seats() {
        assert!(CheckoutMachine::is_valid_transition(
            CheckoutState::Reviewing,
            CheckoutState::SelectingSeats
        ));
    }

    #[test]
    fn test_no_skipping_forward() {
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingShowtime,
            CheckoutState::Reviewing
        ));
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingShowtime,
            CheckoutState::Committed
        ));
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingSeats,
            CheckoutState::Committed
        ));
    }

    #[test]
    fn test_no_backward_to_selecting_showtime() {
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::SelectingSeats,
            CheckoutState::SelectingShowtime
        ));
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::Reviewing,
            CheckoutState::SelectingShowtime
        ));
    }

    #[test]
    fn test_committed_is_terminal() {
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::Committed,
            CheckoutState::SelectingShowtime
        ));
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::Committed,
            CheckoutState::SelectingSeats
        ));
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::Committed,
            CheckoutState::Reviewing
        ));
    }

    #[test]
    fn test_same_state_is_idempotent_before_commit() {
        for state in [
            CheckoutState::SelectingShowtime,
            CheckoutState::SelectingSeats,
            CheckoutState::Reviewing,
        ] {
            assert!(CheckoutMachine::is_valid_transition(state, state));
        }
    }

    #[test]
    fn test_committed_cannot_commit_again() {
        assert!(!CheckoutMachine::is_valid_transition(
            CheckoutState::Committed,
            CheckoutState::Committed
        ));
    }

    #[test]
    fn test_transition_valid() {
        let result =
            CheckoutMachine::transition(CheckoutState::Reviewing, CheckoutState::Committed);
        assert_eq!(result.unwrap(), CheckoutState::Committed);
    }

    #[test]
    fn test_transition_invalid() {
        let result =
            CheckoutMachine::transition(CheckoutState::Committed, CheckoutState::Reviewing);
        assert!(result.unwrap_err().contains("Invalid checkout transition"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn state_strategy() -> impl Strategy<Value = CheckoutState> {
        prop_oneof![
            Just(CheckoutState::SelectingShowtime),
            Just(CheckoutState::SelectingSeats),
            Just(CheckoutState::Reviewing),
            Just(CheckoutState::Committed),
        ]
    }

    proptest! {
        /// Committed never transitions anywhere, itself included
        #[test]
        fn prop_committed_is_terminal(to in state_strategy()) {
            prop_assert!(!CheckoutMachine::is_valid_transition(CheckoutState::Committed, to));
        }

        /// transition() and is_valid_transition() agree
        #[test]
        fn prop_transition_consistency(
            from in state_strategy(),
            to in state_strategy()
        ) {
            let is_valid = CheckoutMachine::is_valid_transition(from, to);
            let result = CheckoutMachine::transition(from, to);

            if is_valid {
                prop_assert_eq!(result.unwrap(), to);
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// Same-state transitions are idempotent no-ops until commit
        #[test]
        fn prop_same_state_valid(state in state_strategy()) {
            if state != CheckoutState::Committed {
                prop_assert!(CheckoutMachine::is_valid_transition(state, state));
            }
        }
    }
}
