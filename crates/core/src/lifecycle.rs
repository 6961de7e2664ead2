//! Booking status state machine.
//!
//! Status is a closed enumeration with a single centralized transition
//! table. Handlers never re-validate transitions themselves; everything
//! goes through [`validate_transition`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a booking.
///
/// Stored as the PostgreSQL enum `booking_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// The status a freshly created booking starts in.
    ///
    /// Tenants with the `auto_confirm_bookings` policy skip `Pending`
    /// within the same creation operation, never as a second step.
    pub fn initial(auto_confirm: bool) -> Self {
        if auto_confirm {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Pending
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Returns the set of statuses reachable from `from`.
///
/// Terminal statuses return an empty slice.
pub fn valid_transitions(from: BookingStatus) -> &'static [BookingStatus] {
    match from {
        BookingStatus::Pending => &[
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ],
        BookingStatus::Confirmed => &[BookingStatus::Cancelled, BookingStatus::Completed],
        BookingStatus::Cancelled | BookingStatus::Completed => &[],
    }
}

/// Check whether a transition from `from` to `to` is legal.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a transition, returning [`CoreError::InvalidTransition`] for
/// illegal ones.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_confirmed() {
        assert!(can_transition(BookingStatus::Pending, BookingStatus::Confirmed));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(BookingStatus::Pending, BookingStatus::Cancelled));
    }

    #[test]
    fn pending_to_completed() {
        assert!(can_transition(BookingStatus::Pending, BookingStatus::Completed));
    }

    #[test]
    fn confirmed_to_cancelled() {
        assert!(can_transition(BookingStatus::Confirmed, BookingStatus::Cancelled));
    }

    #[test]
    fn confirmed_to_completed() {
        assert!(can_transition(BookingStatus::Confirmed, BookingStatus::Completed));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn confirmed_cannot_revert_to_pending() {
        assert!(!can_transition(BookingStatus::Confirmed, BookingStatus::Pending));
    }

    #[test]
    fn terminal_states_are_closed() {
        for from in [BookingStatus::Cancelled, BookingStatus::Completed] {
            assert!(valid_transitions(from).is_empty());
            for to in ALL {
                assert!(!can_transition(from, to), "{from} -> {to} must be illegal");
            }
        }
    }

    #[test]
    fn self_transition_is_illegal() {
        for status in ALL {
            assert!(!can_transition(status, status));
        }
    }

    #[test]
    fn validate_reports_both_ends() {
        let err = validate_transition(BookingStatus::Completed, BookingStatus::Pending);
        assert_matches!(
            err,
            Err(CoreError::InvalidTransition {
                from: BookingStatus::Completed,
                to: BookingStatus::Pending,
            })
        );
    }

    // -----------------------------------------------------------------------
    // Initial status policy
    // -----------------------------------------------------------------------

    #[test]
    fn initial_status_respects_auto_confirm() {
        assert_eq!(BookingStatus::initial(false), BookingStatus::Pending);
        assert_eq!(BookingStatus::initial(true), BookingStatus::Confirmed);
    }

    #[test]
    fn terminal_flags() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }
}
