//! Client-side task filtering for list views.

use chrono::{DateTime, NaiveDate, Utc};

use super::lifecycle::effective_status;
use crate::model::{Priority, Status, UserId, WorkItem};

/// Narrowing criteria for a task list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring of the message.
    pub message: Option<String>,
    /// Matched against the effective status.
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Calendar date (UTC) the deadline falls on.
    pub deadline_on: Option<NaiveDate>,
    pub assigner: Option<UserId>,
    pub recipient: Option<UserId>,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, needle: impl Into<String>) -> Self {
        self.message = Some(needle.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn deadline_on(mut self, date: NaiveDate) -> Self {
        self.deadline_on = Some(date);
        self
    }

    pub fn assigner(mut self, assigner: impl Into<String>) -> Self {
        self.assigner = Some(UserId::new(assigner));
        self
    }

    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(UserId::new(recipient));
        self
    }

    pub fn matches(&self, item: &WorkItem, now: DateTime<Utc>) -> bool {
        self.message
            .as_ref()
            .is_none_or(|needle| item.message.to_lowercase().contains(&needle.to_lowercase()))
            && self.status.is_none_or(|s| effective_status(item, now) == s)
            && self.priority.is_none_or(|p| item.priority == p)
            && self.deadline_on.is_none_or(|d| item.deadline.date_naive() == d)
            && self.assigner.as_ref().is_none_or(|a| &item.assigner == a)
            && self.recipient.as_ref().is_none_or(|r| &item.recipient == r)
    }

    /// Keep the matching items, preserving input order.
    pub fn apply(&self, items: Vec<WorkItem>, now: DateTime<Utc>) -> Vec<WorkItem> {
        items
            .into_iter()
            .filter(|item| self.matches(item, now))
            .collect()
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

    fn items() -> Vec<WorkItem> {
        vec![
            NewWorkItem::new("mgr", "alice", "Prepare Budget", now() + Duration::days(2))
                .priority(Priority::High)
                .build(now())
                .unwrap(),
            NewWorkItem::new("mgr", "bob", "budget review", now() - Duration::days(1))
                .build(now())
                .unwrap(),
            NewWorkItem::new("lead", "alice", "Team offsite", now() + Duration::days(9))
                .status(Status::InProgress)
                .priority(Priority::Low)
                .build(now())
                .unwrap(),
        ]
    }

    fn messages(items: &[WorkItem]) -> Vec<&str> {
        items.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(TaskQuery::new().apply(items(), now()).len(), 3);
    }

    #[test]
    fn message_match_ignores_case() {
        let out = TaskQuery::new().message("BUDGET").apply(items(), now());
        assert_eq!(messages(&out), ["Prepare Budget", "budget review"]);
    }

    #[test]
    fn status_filter_uses_effective_status() {
        let out = TaskQuery::new().status(Status::Overdue).apply(items(), now());
        assert_eq!(messages(&out), ["budget review"]);
        let out = TaskQuery::new().status(Status::Pending).apply(items(), now());
        assert_eq!(messages(&out), ["Prepare Budget"]);
    }

    #[test]
    fn criteria_combine() {
        let out = TaskQuery::new()
            .recipient("alice")
            .assigner("lead")
            .priority(Priority::Low)
            .apply(items(), now());
        assert_eq!(messages(&out), ["Team offsite"]);
    }

    #[test]
    fn deadline_date_filter() {
        let date = (now() + Duration::days(2)).date_naive();
        let out = TaskQuery::new().deadline_on(date).apply(items(), now());
        assert_eq!(messages(&out), ["Prepare Budget"]);
    }
}
