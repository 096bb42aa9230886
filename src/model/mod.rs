//! Core data model.
//!
//! A work item is something that needs doing: it has an assigner and a
//! recipient, a priority, a deadline, and a lifecycle status. Notices and
//! documents are dated records ordered newest-first.

pub mod notice;
pub mod raw;
pub mod work;

pub use notice::{Dated, Document, DocumentId, Notice, NoticeId};
pub use raw::{RawNotice, RawWorkItem};
pub use work::{NewWorkItem, Priority, Status, UserId, WorkId, WorkItem};
