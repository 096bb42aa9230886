//! Notices and documents: published records with no lifecycle beyond existence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record carrying the timestamp it is ordered by.
pub trait Dated {
    fn dated_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeId(pub Uuid);

impl NoticeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NoticeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    /// Reference to the stored notice file.
    pub file_ref: String,
    pub published_date: DateTime<Utc>,
    pub description: Option<String>,
}

impl Dated for Notice {
    fn dated_at(&self) -> DateTime<Utc> {
        self.published_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub file_name: String,
    pub file_path: String,
    pub upload_date: DateTime<Utc>,
    pub file_type: Option<String>,
    /// Size in bytes.
    pub file_size: Option<u64>,
}

impl Dated for Document {
    fn dated_at(&self) -> DateTime<Utc> {
        self.upload_date
    }
}
