//! Overdue sweep: find open items whose deadline has elapsed.
//!
//! The sweep only detects. Committing `status := Overdue` is the store's job;
//! see [`crate::engine::board`] for the commit step.

use chrono::{DateTime, Utc};

use super::lifecycle::{Trigger, validate_transition};
use crate::error::Result;
use crate::model::{Status, WorkId, WorkItem};

/// Does `item` need to be flagged Overdue at `now`?
pub fn needs_overdue(item: &WorkItem, now: DateTime<Utc>) -> bool {
    !item.status.is_terminal() && item.status != Status::Overdue && item.deadline < now
}

/// The subset of `items` whose stored status must become Overdue.
///
/// Idempotent: once the flagged items carry `Overdue`, a second pass at the
/// same `now` returns nothing.
pub fn sweep(items: &[WorkItem], now: DateTime<Utc>) -> Vec<&WorkItem> {
    items.iter().filter(|item| needs_overdue(item, now)).collect()
}

/// Apply the sweep to in-memory copies, returning the ids that changed.
pub fn apply(items: &mut [WorkItem], now: DateTime<Utc>) -> Result<Vec<WorkId>> {
    let mut changed = Vec::new();
    for item in items.iter_mut().filter(|item| needs_overdue(item, now)) {
        validate_transition(item.status, Status::Overdue, Trigger::Sweep)?;
        item.status = Status::Overdue;
        changed.push(item.id);
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lifecycle::effective_status;
    use crate::model::{NewWorkItem, Priority};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(status: Status, deadline: DateTime<Utc>) -> WorkItem {
        NewWorkItem::new("mgr", "alice", "ship", deadline)
            .priority(Priority::Low)
            .status(status)
            .build(now())
            .unwrap()
    }

    #[test]
    fn flags_lapsed_open_items() {
        let c = item(Status::Pending, now() - Duration::days(5));
        let flagged = sweep(std::slice::from_ref(&c), now());
        assert_eq!(flagged, vec![&c]);
    }

    #[test]
    fn skips_completed_overdue_and_future_items() {
        let past = now() - Duration::days(1);
        let items = vec![
            item(Status::Completed, past),
            item(Status::Overdue, past),
            item(Status::Pending, now() + Duration::days(1)),
            item(Status::InProgress, now()),
        ];
        assert!(sweep(&items, now()).is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let past = now() - Duration::days(2);
        let mut items = vec![
            item(Status::Pending, past),
            item(Status::InProgress, past),
            item(Status::Completed, past),
        ];

        let changed = apply(&mut items, now()).unwrap();
        assert_eq!(changed, vec![items[0].id, items[1].id]);
        assert_eq!(items[2].status, Status::Completed);

        assert!(sweep(&items, now()).is_empty());
        assert!(apply(&mut items, now()).unwrap().is_empty());
    }

    #[test]
    fn persisted_transition_matches_effective_status() {
        let mut items = vec![item(Status::Pending, now() - Duration::days(5))];
        apply(&mut items, now()).unwrap();
        assert_eq!(items[0].status, Status::Overdue);
        assert_eq!(effective_status(&items[0], now()), Status::Overdue);
    }
}
