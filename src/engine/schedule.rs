//! Priority scheduling: the one urgency ordering every task view uses.
//!
//! Ordering, evaluated in turn:
//! 1. Completed items trail everything else.
//! 2. Higher score first.
//! 3. Equal scores: fewer days until the deadline first.
//!
//! Remaining ties keep their input order (the sort is stable).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use super::lifecycle::effective_status;
use super::score::{days_until, score};
use crate::model::{Status, WorkItem};

/// A work item together with the keys it was ranked by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub item: WorkItem,
    pub effective_status: Status,
    pub days_until: i64,
    pub score: i64,
}

impl RankedItem {
    pub fn new(item: WorkItem, now: DateTime<Utc>) -> Self {
        Self {
            effective_status: effective_status(&item, now),
            days_until: days_until(item.deadline, now),
            score: score(&item, now),
            item,
        }
    }

    fn is_completed(&self) -> bool {
        self.effective_status == Status::Completed
    }
}

/// Urgency comparator over precomputed keys.
pub fn compare(a: &RankedItem, b: &RankedItem) -> Ordering {
    a.is_completed()
        .cmp(&b.is_completed())
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.days_until.cmp(&b.days_until))
}

/// Rank owned items at `now`, most urgent first.
pub fn rank(items: Vec<WorkItem>, now: DateTime<Utc>) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items
        .into_iter()
        .map(|item| RankedItem::new(item, now))
        .collect();
    ranked.sort_by(compare);
    ranked
}

/// Return a new sequence of `items` ordered by urgency at `now`.
///
/// The input is left untouched. Holds no state between calls; re-run it
/// whenever `now` or the collection changes.
pub fn schedule(items: &[WorkItem], now: DateTime<Utc>) -> Vec<WorkItem> {
    rank(items.to_vec(), now)
        .into_iter()
        .map(|ranked| ranked.item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewWorkItem, Priority};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(msg: &str, priority: Priority, status: Status, deadline: DateTime<Utc>) -> WorkItem {
        NewWorkItem::new("mgr", "alice", msg, deadline)
            .priority(priority)
            .status(status)
            .build(now())
            .unwrap()
    }

    fn messages(items: &[WorkItem]) -> Vec<&str> {
        items.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn higher_priority_wins_on_same_deadline() {
        let d = now() + Duration::days(1);
        let a = item("A", Priority::High, Status::Pending, d);
        let b = item("B", Priority::Low, Status::Pending, d);

        assert_eq!(messages(&schedule(&[a.clone(), b.clone()], now())), ["A", "B"]);
        assert_eq!(messages(&schedule(&[b, a], now())), ["A", "B"]);
    }

    #[test]
    fn completed_trails_even_with_a_huge_score() {
        let done = item("done", Priority::High, Status::Completed, now() - Duration::days(90));
        let idle = item("idle", Priority::Low, Status::Pending, now() + Duration::days(365));

        let out = schedule(&[done, idle], now());
        assert_eq!(messages(&out), ["idle", "done"]);
    }

    #[test]
    fn equal_scores_break_on_sooner_deadline() {
        // High/Pending due in 6d: 100 + 25 + 240 = 365
        // Medium/Pending due in 1d: 50 + 25 + 290 = 365
        let later = item("later", Priority::High, Status::Pending, now() + Duration::days(6));
        let sooner = item("sooner", Priority::Medium, Status::Pending, now() + Duration::days(1));

        let ranked = rank(vec![later, sooner], now());
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].item.message, "sooner");
    }

    #[test]
    fn full_ties_keep_input_order() {
        let d = now() + Duration::days(3);
        let items: Vec<_> = ["x", "y", "z"]
            .into_iter()
            .map(|m| item(m, Priority::Medium, Status::Pending, d))
            .collect();
        assert_eq!(messages(&schedule(&items, now())), ["x", "y", "z"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let d = now() + Duration::days(3);
        let items = vec![
            item("low", Priority::Low, Status::Pending, d),
            item("high", Priority::High, Status::Pending, d),
        ];
        let before = items.clone();
        let _ = schedule(&items, now());
        assert_eq!(items, before);
    }

    #[test]
    fn moving_now_can_reorder() {
        // Same priority; one in progress and due later, one pending and due sooner.
        let a = item("a", Priority::Medium, Status::InProgress, now() + Duration::days(10));
        let b = item("b", Priority::Medium, Status::Pending, now() + Duration::days(8));

        // now: a = 50+50+200 = 300, b = 50+25+220 = 295
        assert_eq!(messages(&schedule(&[a.clone(), b.clone()], now())), ["a", "b"]);

        // nine days on: b has lapsed and scores as Overdue.
        let later = now() + Duration::days(9);
        assert_eq!(messages(&schedule(&[a, b], later)), ["b", "a"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(schedule(&[], now()).is_empty());
    }
}
