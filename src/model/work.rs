//! Work items: tasks handed from an assigner to a recipient with a deadline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Newtype for work item IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub Uuid);

impl WorkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(WorkId)
            .map_err(|e| Error::validation("id", format!("{s:?} is not a valid id: {e}")))
    }
}

/// Opaque identifier of a user account (assigner or recipient).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress", alias = "in_progress")]
    InProgress,
    /// Terminal. No automatic transition may leave it.
    Completed,
    /// Reached automatically once the deadline has elapsed.
    Overdue,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Overdue,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Overdue => "Overdue",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pending" => Ok(Status::Pending),
            "In Progress" | "InProgress" | "in_progress" => Ok(Status::InProgress),
            "Completed" => Ok(Status::Completed),
            "Overdue" => Ok(Status::Overdue),
            other => Err(Error::validation(
                "status",
                format!("unknown status {other:?}"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            other => Err(Error::validation(
                "priority",
                format!("unknown priority {other:?}"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Work Item
// ---------------------------------------------------------------------------

/// A unit of assigned work. Owned by the store; the engine only ever sees
/// per-request copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkId,

    /// Account that handed out the work. May equal `recipient`.
    pub assigner: UserId,
    pub recipient: UserId,

    /// Free-text description. Never empty.
    pub message: String,

    pub link: Option<String>,
    pub attachment: Option<String>,

    /// Stored status. Read through `effective_status` for anything user-facing.
    pub status: Status,
    pub priority: Priority,

    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for creating new work items.
#[derive(Debug, Clone)]
pub struct NewWorkItem {
    pub(crate) assigner: UserId,
    pub(crate) recipient: UserId,
    pub(crate) message: String,
    pub(crate) deadline: DateTime<Utc>,
    pub(crate) link: Option<String>,
    pub(crate) attachment: Option<String>,
    pub(crate) status: Status,
    pub(crate) priority: Priority,
}

impl NewWorkItem {
    pub fn new(
        assigner: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            assigner: UserId::new(assigner),
            recipient: UserId::new(recipient),
            message: message.into(),
            deadline,
            link: None,
            attachment: None,
            status: Status::default(),
            priority: Priority::default(),
        }
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Validate and stamp the item with a fresh id and `created_at`.
    pub fn build(self, created_at: DateTime<Utc>) -> Result<WorkItem> {
        if self.message.trim().is_empty() {
            return Err(Error::validation("message", "must not be empty"));
        }
        if self.assigner.as_str().trim().is_empty() {
            return Err(Error::validation("assigner", "must not be empty"));
        }
        if self.recipient.as_str().trim().is_empty() {
            return Err(Error::validation("recipient", "must not be empty"));
        }
        Ok(WorkItem {
            id: WorkId::new(),
            assigner: self.assigner,
            recipient: self.recipient,
            message: self.message,
            link: self.link,
            attachment: self.attachment,
            status: self.status,
            priority: self.priority,
            deadline: self.deadline,
            created_at,
        })
    }
}
