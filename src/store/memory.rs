//! In-memory store backed by an optional JSON data file.
//!
//! Keeps insertion order for every collection, validates manual status
//! changes through the lifecycle rules, and appends an event for every
//! transition it records.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use super::{DocumentSource, ItemFilter, ItemSink, ItemSource, NoticeSource};
use crate::clock::{Clock, SystemClock};
use crate::engine::lifecycle::{Trigger, validate_transition};
use crate::error::{Error, Result};
use crate::event::{Event, EventKind};
use crate::model::*;

/// On-disk layout of the data file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DataFile {
    tasks: Vec<RawWorkItem>,
    notices: Vec<RawNotice>,
    documents: Vec<Document>,
}

#[derive(Default)]
struct Inner {
    items: Vec<WorkItem>,
    notices: Vec<Notice>,
    documents: Vec<Document>,
    events: Vec<Event>,
    next_seq: u64,
}

impl Inner {
    fn record_event(&mut self, kind: EventKind, clock: &dyn Clock) {
        self.next_seq += 1;
        self.events.push(Event {
            seq: self.next_seq,
            timestamp: clock.now(),
            kind,
        });
    }

    fn item_mut(&mut self, id: WorkId) -> Result<&mut WorkItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::NotFound(format!("work item {id}")))
    }

    fn transition(&mut self, id: WorkId, to: Status, trigger: Trigger, clock: &dyn Clock) -> Result<Status> {
        let item = self.item_mut(id)?;
        let from = item.status;
        validate_transition(from, to, trigger)?;
        if from != to {
            item.status = to;
            self.record_event(EventKind::StatusTransition { id, from, to, trigger }, clock);
            debug!(work_id = %id, %from, %to, %trigger, "status changed");
        }
        Ok(from)
    }
}

/// Store for work items, notices, and documents. Shareable across threads.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Use `clock` for creation times and event timestamps.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Store("store lock poisoned".to_string()))
    }

    /// Load a store from a JSON data file. Every record is validated.
    pub fn load_json(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let data: DataFile = serde_json::from_str(&content)?;

        let store = Self::with_clock(clock);
        {
            let mut inner = store.lock()?;
            for raw in data.tasks {
                let item = WorkItem::try_from(raw)?;
                if inner.items.iter().any(|existing| existing.id == item.id) {
                    return Err(Error::validation("id", format!("duplicate work item {}", item.id)));
                }
                inner.items.push(item);
            }
            for raw in data.notices {
                inner.notices.push(Notice::try_from(raw)?);
            }
            inner.documents = data.documents;
        }
        debug!(path = %path.as_ref().display(), "store loaded");
        Ok(store)
    }

    /// Write the current contents back out as a JSON data file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = {
            let inner = self.lock()?;
            DataFile {
                tasks: inner.items.iter().map(RawWorkItem::from).collect(),
                notices: inner.notices.iter().map(RawNotice::from).collect(),
                documents: inner.documents.clone(),
            }
        };
        let json = serde_json::to_string_pretty(&data)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Validate and store a new work item.
    pub fn create(&self, new: NewWorkItem) -> Result<WorkItem> {
        let item = new.build(self.clock.now())?;
        self.insert_item(item.clone())?;
        Ok(item)
    }

    /// Insert an already-built work item. Ids must be unique.
    pub fn insert_item(&self, item: WorkItem) -> Result<()> {
        let mut inner = self.lock()?;
        if inner.items.iter().any(|existing| existing.id == item.id) {
            return Err(Error::validation("id", format!("duplicate work item {}", item.id)));
        }
        let kind = EventKind::WorkCreated {
            id: item.id,
            assigner: item.assigner.clone(),
            recipient: item.recipient.clone(),
            priority: item.priority,
        };
        inner.items.push(item);
        inner.record_event(kind, self.clock.as_ref());
        Ok(())
    }

    pub fn get(&self, id: WorkId) -> Result<WorkItem> {
        self.lock()?
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("work item {id}")))
    }

    /// Change a status by hand. Overdue is not a valid target here.
    pub fn set_status(&self, id: WorkId, status: Status) -> Result<WorkItem> {
        let mut inner = self.lock()?;
        inner.transition(id, status, Trigger::Manual, self.clock.as_ref())?;
        inner.item_mut(id).map(|item| item.clone())
    }

    pub fn insert_notice(&self, notice: Notice) -> Result<()> {
        self.lock()?.notices.push(notice);
        Ok(())
    }

    pub fn insert_document(&self, document: Document) -> Result<()> {
        self.lock()?.documents.push(document);
        Ok(())
    }

    /// Events with a sequence number greater than `since_seq`.
    pub fn events_since(&self, since_seq: u64) -> Result<Vec<Event>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|event| event.seq > since_seq)
            .cloned()
            .collect())
    }
}

impl ItemSource for MemoryStore {
    fn fetch_items(&self, filter: &ItemFilter) -> Result<Vec<WorkItem>> {
        Ok(self
            .lock()?
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }
}

impl ItemSink for MemoryStore {
    fn persist_status(&self, id: WorkId, status: Status) -> Result<()> {
        let mut inner = self.lock()?;
        inner.transition(id, status, Trigger::Sweep, self.clock.as_ref())?;
        Ok(())
    }
}

impl NoticeSource for MemoryStore {
    fn fetch_notices(&self) -> Result<Vec<Notice>> {
        Ok(self.lock()?.notices.clone())
    }
}

impl DocumentSource for MemoryStore {
    fn fetch_documents(&self) -> Result<Vec<Document>> {
        Ok(self.lock()?.documents.clone())
    }
}
