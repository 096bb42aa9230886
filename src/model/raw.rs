//! Raw records as they arrive from the store or a data file.
//!
//! Every field is loosely typed here. Conversion into the domain types
//! validates each field and fails fast naming the offending one, so a
//! malformed record can never reach the scorer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::notice::{Notice, NoticeId};
use super::work::{Priority, Status, UserId, WorkId, WorkItem};
use crate::clock::instant_from_millis;
use crate::error::{Error, Result};

/// An instant as stored: either RFC 3339 text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstant {
    Millis(f64),
    Text(String),
}

impl RawInstant {
    fn parse(&self, field: &'static str) -> Result<DateTime<Utc>> {
        match self {
            RawInstant::Millis(ms) => instant_from_millis(*ms)
                .map_err(|e| Error::validation(field, e.to_string())),
            RawInstant::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| Error::validation(field, format!("{s:?} is not a valid instant: {e}"))),
        }
    }
}

impl From<DateTime<Utc>> for RawInstant {
    fn from(t: DateTime<Utc>) -> Self {
        RawInstant::Text(t.to_rfc3339())
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Error::validation(field, "is required")),
    }
}

fn required_instant(value: &Option<RawInstant>, field: &'static str) -> Result<DateTime<Utc>> {
    value
        .as_ref()
        .ok_or_else(|| Error::validation(field, "is required"))?
        .parse(field)
}

// ---------------------------------------------------------------------------
// Work items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWorkItem {
    pub id: Option<String>,
    pub assigner: Option<String>,
    pub recipient: Option<String>,
    pub message: Option<String>,
    pub link: Option<String>,
    #[serde(alias = "attachments", alias = "attachmentRef")]
    pub attachment: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<RawInstant>,
    pub created_at: Option<RawInstant>,
}

impl TryFrom<RawWorkItem> for WorkItem {
    type Error = Error;

    fn try_from(raw: RawWorkItem) -> Result<Self> {
        let id = required(&raw.id, "id")?.parse::<WorkId>()?;
        let assigner = UserId::new(required(&raw.assigner, "assigner")?);
        let recipient = UserId::new(required(&raw.recipient, "recipient")?);
        let message = required(&raw.message, "message")?.to_string();

        let status = match raw.status.as_deref() {
            Some(s) => s.parse::<Status>()?,
            None => Status::default(),
        };
        let priority = match raw.priority.as_deref() {
            Some(s) => s.parse::<Priority>()?,
            None => Priority::default(),
        };

        let deadline = required_instant(&raw.deadline, "deadline")?;
        let created_at = required_instant(&raw.created_at, "createdAt")?;

        Ok(WorkItem {
            id,
            assigner,
            recipient,
            message,
            link: raw.link.filter(|s| !s.is_empty()),
            attachment: raw.attachment.filter(|s| !s.is_empty()),
            status,
            priority,
            deadline,
            created_at,
        })
    }
}

impl From<&WorkItem> for RawWorkItem {
    fn from(item: &WorkItem) -> Self {
        Self {
            id: Some(item.id.to_string()),
            assigner: Some(item.assigner.to_string()),
            recipient: Some(item.recipient.to_string()),
            message: Some(item.message.clone()),
            link: item.link.clone(),
            attachment: item.attachment.clone(),
            status: Some(item.status.to_string()),
            priority: Some(item.priority.to_string()),
            deadline: Some(item.deadline.into()),
            created_at: Some(item.created_at.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNotice {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(alias = "file")]
    pub file_ref: Option<String>,
    pub published_date: Option<RawInstant>,
    pub description: Option<String>,
}

impl TryFrom<RawNotice> for Notice {
    type Error = Error;

    fn try_from(raw: RawNotice) -> Result<Self> {
        let id = required(&raw.id, "id")?;
        let id = uuid::Uuid::parse_str(id)
            .map(NoticeId)
            .map_err(|e| Error::validation("id", format!("{id:?} is not a valid id: {e}")))?;

        Ok(Notice {
            id,
            title: required(&raw.title, "title")?.to_string(),
            file_ref: required(&raw.file_ref, "fileRef")?.to_string(),
            published_date: required_instant(&raw.published_date, "publishedDate")?,
            description: raw.description.filter(|s| !s.is_empty()),
        })
    }
}

impl From<&Notice> for RawNotice {
    fn from(notice: &Notice) -> Self {
        Self {
            id: Some(notice.id.to_string()),
            title: Some(notice.title.clone()),
            file_ref: Some(notice.file_ref.clone()),
            published_date: Some(notice.published_date.into()),
            description: notice.description.clone(),
        }
    }
}
