//! Structured events recorded by the store on every status change.
//!
//! Consumers read the event log to build audit trails or activity feeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::lifecycle::Trigger;
use crate::model::{Priority, Status, UserId, WorkId};

/// A structured event recorded by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic sequence number. Consumers can detect gaps.
    pub seq: u64,
    /// When this event occurred.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    WorkCreated {
        id: WorkId,
        assigner: UserId,
        recipient: UserId,
        priority: Priority,
    },
    StatusTransition {
        id: WorkId,
        from: Status,
        to: Status,
        trigger: Trigger,
    },
}
