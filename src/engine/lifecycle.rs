//! Status lifecycle: which transitions are legal, and what an item's status
//! effectively is right now.
//!
//! ```text
//! Pending <-> InProgress --> Completed (terminal)
//!    \           /              ^
//!     \         /               | manual
//!      +-> Overdue -------------+
//!        (sweep only)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Status, WorkItem};

/// What drives a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// An authorized actor changing the status by hand.
    Manual,
    /// The overdue sweep.
    Sweep,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Trigger::Manual => "manual",
            Trigger::Sweep => "sweep",
        })
    }
}

/// Can `from` move to `to` under `trigger`?
///
/// Re-setting the current status is always a no-op and therefore allowed,
/// which keeps repeated sweep commits idempotent.
pub fn can_transition(from: Status, to: Status, trigger: Trigger) -> bool {
    use Status::*;

    if from == to {
        return true;
    }
    if from.is_terminal() {
        return false;
    }
    match trigger {
        Trigger::Sweep => matches!((from, to), (Pending, Overdue) | (InProgress, Overdue)),
        Trigger::Manual => matches!(
            (from, to),
            (Pending, InProgress)
                | (Pending, Completed)
                | (InProgress, Pending)
                | (InProgress, Completed)
                | (Overdue, Completed)
                // Reopening an overdue item is allowed; the displayed status
                // stays Overdue until the deadline is moved.
                | (Overdue, Pending)
                | (Overdue, InProgress)
        ),
    }
}

/// Validate a transition, returning an error if disallowed.
pub fn validate_transition(from: Status, to: Status, trigger: Trigger) -> Result<()> {
    if can_transition(from, to, trigger) {
        Ok(())
    } else {
        Err(Error::InvalidTransition { from, to, trigger })
    }
}

/// The status an item should be treated as having at `now`.
///
/// This is the only read path for status. The stored field is a cache the
/// sweep keeps eventually consistent; scores, filters, reports and badges all
/// go through here.
pub fn effective_status(item: &WorkItem, now: DateTime<Utc>) -> Status {
    if item.status.is_terminal() {
        item.status
    } else if item.deadline < now {
        Status::Overdue
    } else {
        item.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewWorkItem;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(status: Status, deadline: DateTime<Utc>) -> WorkItem {
        NewWorkItem::new("mgr", "alice", "audit", deadline)
            .status(status)
            .build(now())
            .unwrap()
    }

    #[test]
    fn completed_is_terminal_for_every_trigger() {
        for to in [Status::Pending, Status::InProgress, Status::Overdue] {
            assert!(!can_transition(Status::Completed, to, Trigger::Manual));
            assert!(!can_transition(Status::Completed, to, Trigger::Sweep));
        }
    }

    #[test]
    fn overdue_is_never_a_manual_target() {
        for from in [Status::Pending, Status::InProgress] {
            let err = validate_transition(from, Status::Overdue, Trigger::Manual).unwrap_err();
            assert!(matches!(err, Error::InvalidTransition { to: Status::Overdue, .. }));
        }
    }

    #[test]
    fn sweep_only_moves_open_items_to_overdue() {
        assert!(can_transition(Status::Pending, Status::Overdue, Trigger::Sweep));
        assert!(can_transition(Status::InProgress, Status::Overdue, Trigger::Sweep));
        assert!(!can_transition(Status::Pending, Status::Completed, Trigger::Sweep));
        assert!(!can_transition(Status::InProgress, Status::Pending, Trigger::Sweep));
    }

    #[test]
    fn overdue_items_can_still_be_completed() {
        assert!(can_transition(Status::Overdue, Status::Completed, Trigger::Manual));
    }

    #[test]
    fn same_status_is_a_noop() {
        for s in Status::ALL {
            assert!(can_transition(s, s, Trigger::Sweep));
            assert!(can_transition(s, s, Trigger::Manual));
        }
    }

    #[test]
    fn effective_status_reflects_elapsed_deadline() {
        let past = now() - Duration::hours(1);
        let future = now() + Duration::hours(1);

        assert_eq!(effective_status(&item(Status::Pending, past), now()), Status::Overdue);
        assert_eq!(effective_status(&item(Status::InProgress, past), now()), Status::Overdue);
        assert_eq!(effective_status(&item(Status::Completed, past), now()), Status::Completed);
        assert_eq!(effective_status(&item(Status::Pending, future), now()), Status::Pending);
        // Stored Overdue stays Overdue even if the deadline was later pushed out.
        assert_eq!(effective_status(&item(Status::Overdue, future), now()), Status::Overdue);
    }

    #[test]
    fn deadline_equal_to_now_is_not_elapsed() {
        assert_eq!(effective_status(&item(Status::Pending, now()), now()), Status::Pending);
    }
}
