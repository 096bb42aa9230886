//! Urgency score for a single work item.
//!
//! `score = priority weight + status weight + (30 - days until deadline) * 10`
//!
//! The status weight uses the effective status, so an item whose deadline has
//! lapsed scores as Overdue whether or not the sweep has caught up. Scores are
//! unbounded in both directions.

use chrono::{DateTime, Utc};

use super::lifecycle::effective_status;
use crate::error::Result;
use crate::model::{Priority, RawWorkItem, Status, WorkItem};

/// Days out at which the deadline contributes nothing.
pub const DEADLINE_ANCHOR_DAYS: i64 = 30;

/// Points per day of distance from the anchor.
pub const DEADLINE_WEIGHT: i64 = 10;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn priority_weight(priority: Priority) -> i64 {
    match priority {
        Priority::High => 100,
        Priority::Medium => 50,
        Priority::Low => 25,
    }
}

pub fn status_weight(status: Status) -> i64 {
    match status {
        Status::Completed => 0,
        Status::Pending => 25,
        Status::InProgress => 50,
        Status::Overdue => 100,
    }
}

/// Whole days until `deadline`, rounded up. Negative once it has elapsed.
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (deadline - now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    // Integer division truncates toward zero; bump positive remainders up.
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Urgency score of `item` at `now`. Higher is more urgent.
pub fn score(item: &WorkItem, now: DateTime<Utc>) -> i64 {
    priority_weight(item.priority)
        + status_weight(effective_status(item, now))
        + (DEADLINE_ANCHOR_DAYS - days_until(item.deadline, now)) * DEADLINE_WEIGHT
}

/// Validate a raw record and score it.
pub fn try_score(raw: RawWorkItem, now: DateTime<Utc>) -> Result<i64> {
    let item = WorkItem::try_from(raw)?;
    Ok(score(&item, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewWorkItem;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(priority: Priority, status: Status, deadline: DateTime<Utc>) -> WorkItem {
        NewWorkItem::new("mgr", "alice", "review", deadline)
            .priority(priority)
            .status(status)
            .build(now())
            .unwrap()
    }

    #[test]
    fn days_until_rounds_up() {
        let n = now();
        assert_eq!(days_until(n, n), 0);
        assert_eq!(days_until(n + Duration::hours(1), n), 1);
        assert_eq!(days_until(n + Duration::days(1), n), 1);
        assert_eq!(days_until(n + Duration::days(1) + Duration::milliseconds(1), n), 2);
        assert_eq!(days_until(n - Duration::hours(1), n), 0);
        assert_eq!(days_until(n - Duration::hours(36), n), -1);
        assert_eq!(days_until(n - Duration::days(5), n), -5);
    }

    #[test]
    fn weights_match_table() {
        let d = now() + Duration::days(30);
        assert_eq!(score(&item(Priority::High, Status::Pending, d), now()), 125);
        assert_eq!(score(&item(Priority::Medium, Status::InProgress, d), now()), 100);
        assert_eq!(score(&item(Priority::Low, Status::Completed, d), now()), 25);
        assert_eq!(score(&item(Priority::Low, Status::Overdue, d), now()), 125);
    }

    #[test]
    fn deadline_term_is_unclamped() {
        let far = now() + Duration::days(400);
        assert_eq!(
            score(&item(Priority::Low, Status::Pending, far), now()),
            25 + 25 + (30 - 400) * 10
        );
    }

    #[test]
    fn lapsed_deadline_scores_as_overdue() {
        // Low + Overdue(100) + (30 - (-5)) * 10
        let c = item(Priority::Low, Status::Pending, now() - Duration::days(5));
        assert_eq!(score(&c, now()), 25 + 100 + 350);
    }

    #[test]
    fn raw_records_fail_validation_before_scoring() {
        let raw = RawWorkItem {
            id: Some(uuid::Uuid::new_v4().to_string()),
            assigner: Some("mgr".into()),
            recipient: Some("alice".into()),
            message: Some("review".into()),
            priority: Some("Extreme".into()),
            deadline: Some(now().into()),
            created_at: Some(now().into()),
            ..Default::default()
        };
        assert!(try_score(raw, now()).is_err());
    }
}
