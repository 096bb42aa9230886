//! Persistence collaborators.
//!
//! The engine never owns work items or notices. It reads per-request copies
//! through these ports and hands sweep results back through [`ItemSink`].
//! Implementations must make `persist_status` idempotent: writing the same
//! status twice is a no-op.

pub mod memory;

use crate::error::Result;
use crate::model::{Document, Notice, Status, UserId, WorkId, WorkItem};

pub use memory::MemoryStore;

/// Which work items a view asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemFilter {
    #[default]
    All,
    /// Items assigned to this user.
    Recipient(UserId),
    /// Items this user handed out.
    Assigner(UserId),
}

impl ItemFilter {
    pub fn matches(&self, item: &WorkItem) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Recipient(user) => &item.recipient == user,
            ItemFilter::Assigner(user) => &item.assigner == user,
        }
    }
}

pub trait ItemSource {
    fn fetch_items(&self, filter: &ItemFilter) -> Result<Vec<WorkItem>>;
}

pub trait ItemSink {
    /// Commit a status change produced by the overdue sweep.
    fn persist_status(&self, id: WorkId, status: Status) -> Result<()>;
}

pub trait NoticeSource {
    fn fetch_notices(&self) -> Result<Vec<Notice>>;
}

pub trait DocumentSource {
    fn fetch_documents(&self) -> Result<Vec<Document>>;
}
