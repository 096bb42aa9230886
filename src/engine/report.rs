//! Task reports: status totals, per-user tallies, and monthly completions.
//!
//! All counts are taken over effective status, so an item past its deadline
//! counts as Overdue even before the sweep has persisted it.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::lifecycle::effective_status;
use crate::model::{Status, UserId, WorkItem};

/// Totals per effective status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl StatusSummary {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WorkItem>, now: DateTime<Utc>) -> Self {
        let mut summary = Self::default();
        for item in items {
            summary.total += 1;
            match effective_status(item, now) {
                Status::Pending => summary.pending += 1,
                Status::InProgress => summary.in_progress += 1,
                Status::Completed => summary.completed += 1,
                Status::Overdue => summary.overdue += 1,
            }
        }
        summary
    }
}

/// Restricts a report to items created in a year (and optionally a month)
/// and, optionally, to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    /// 1-based month.
    pub month: Option<u32>,
    pub recipient: Option<UserId>,
}

impl ReportPeriod {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            recipient: None,
        }
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(UserId::new(recipient));
        self
    }

    pub fn contains(&self, item: &WorkItem) -> bool {
        item.created_at.year() == self.year
            && self.month.is_none_or(|m| item.created_at.month() == m)
            && self.recipient.as_ref().is_none_or(|r| &item.recipient == r)
    }

    pub fn select<'a>(&self, items: &'a [WorkItem]) -> Vec<&'a WorkItem> {
        items.iter().filter(|item| self.contains(item)).collect()
    }
}

/// Completed and overdue counts for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTally {
    pub user: UserId,
    pub completed: usize,
    pub overdue: usize,
}

/// Per-recipient tallies, most completions first. Users with equal
/// completion counts keep first-seen order.
pub fn user_tallies<'a>(
    items: impl IntoIterator<Item = &'a WorkItem>,
    now: DateTime<Utc>,
) -> Vec<UserTally> {
    let mut index: HashMap<&UserId, usize> = HashMap::new();
    let mut tallies: Vec<UserTally> = Vec::new();

    for item in items {
        let slot = *index.entry(&item.recipient).or_insert_with(|| {
            tallies.push(UserTally {
                user: item.recipient.clone(),
                completed: 0,
                overdue: 0,
            });
            tallies.len() - 1
        });
        match effective_status(item, now) {
            Status::Completed => tallies[slot].completed += 1,
            Status::Overdue => tallies[slot].overdue += 1,
            _ => {}
        }
    }

    tallies.sort_by(|a, b| b.completed.cmp(&a.completed));
    tallies
}

/// Completed items per creation month of `year`, January first.
pub fn monthly_completed<'a>(items: impl IntoIterator<Item = &'a WorkItem>, year: i32) -> [usize; 12] {
    let mut buckets = [0usize; 12];
    for item in items {
        if item.status == Status::Completed && item.created_at.year() == year {
            buckets[item.created_at.month0() as usize] += 1;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewWorkItem;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn item(recipient: &str, status: Status, deadline_days: i64, created: DateTime<Utc>) -> WorkItem {
        NewWorkItem::new("mgr", recipient, "work", now() + Duration::days(deadline_days))
            .status(status)
            .build(created)
            .unwrap()
    }

    fn sample() -> Vec<WorkItem> {
        let jan = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2023, 11, 2, 0, 0, 0).unwrap();
        vec![
            item("alice", Status::Completed, -3, jan),
            item("bob", Status::Pending, -1, mar),
            item("bob", Status::Completed, 4, mar),
            item("bob", Status::Completed, 4, mar),
            item("alice", Status::InProgress, 2, mar),
            item("carol", Status::Completed, 1, last_year),
        ]
    }

    #[test]
    fn summary_counts_effective_status() {
        let items = sample();
        let summary = StatusSummary::from_items(&items, now());
        assert_eq!(
            summary,
            StatusSummary {
                total: 6,
                pending: 0,
                in_progress: 1,
                completed: 4,
                overdue: 1,
            }
        );
    }

    #[test]
    fn period_filters_by_creation_month_and_recipient() {
        let items = sample();
        assert_eq!(ReportPeriod::year(2024).select(&items).len(), 5);
        assert_eq!(ReportPeriod::year(2024).month(3).select(&items).len(), 4);
        assert_eq!(
            ReportPeriod::year(2024).month(3).recipient("bob").select(&items).len(),
            3
        );
        assert_eq!(ReportPeriod::year(2023).select(&items).len(), 1);
    }

    #[test]
    fn tallies_rank_by_completions() {
        let items = sample();
        let tallies = user_tallies(&items, now());
        let users: Vec<_> = tallies.iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, ["bob", "alice", "carol"]);
        assert_eq!(tallies[0].completed, 2);
        assert_eq!(tallies[0].overdue, 1);
    }

    #[test]
    fn monthly_buckets() {
        let items = sample();
        let months = monthly_completed(&items, 2024);
        assert_eq!(months[0], 1);
        assert_eq!(months[2], 2);
        assert_eq!(months.iter().sum::<usize>(), 3);
    }
}
