//! Board loading: the read path every task and notice view goes through.
//!
//! fetch -> sweep -> commit flagged transitions -> rank
//!
//! `now` is snapshotted once per load. A failed commit never fails the load:
//! the item is still ranked by its effective status and the failure comes
//! back as a [`Warning`].

use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

use super::chrono_order::order_by_date_descending;
use super::schedule::{RankedItem, rank};
use super::sweep::sweep;
use crate::clock::Clock;
use crate::error::Result;
use crate::model::{Document, Notice, Status, WorkId};
use crate::store::{DocumentSource, ItemFilter, ItemSink, ItemSource, NoticeSource};
use crate::telemetry::board::{record_status_transition, start_board_span};
use crate::telemetry::metrics;

/// A non-fatal problem encountered while loading a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Warning {
    /// The store rejected or failed an Overdue commit.
    PersistFailed { id: WorkId, reason: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::PersistFailed { id, reason } => {
                write!(f, "could not mark {id} overdue: {reason}")
            }
        }
    }
}

/// A ranked task list as of `now`.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub now: DateTime<Utc>,
    /// Most urgent first, Completed last.
    pub entries: Vec<RankedItem>,
    /// Items the sweep flagged and the store committed as Overdue.
    pub flagged: Vec<WorkId>,
    pub warnings: Vec<Warning>,
}

impl BoardView {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn view_label(filter: &ItemFilter) -> &'static str {
    match filter {
        ItemFilter::All => "all",
        ItemFilter::Recipient(_) => "recipient",
        ItemFilter::Assigner(_) => "assigner",
    }
}

/// Task board over a store's item ports.
pub struct TaskBoard<'a> {
    source: &'a dyn ItemSource,
    sink: &'a dyn ItemSink,
    clock: &'a dyn Clock,
    sweep: bool,
    ranked: bool,
}

impl<'a> TaskBoard<'a> {
    pub fn new(source: &'a dyn ItemSource, sink: &'a dyn ItemSink, clock: &'a dyn Clock) -> Self {
        Self {
            source,
            sink,
            clock,
            sweep: true,
            ranked: true,
        }
    }

    /// Skip committing sweep results. Ranking still uses effective status.
    pub fn without_sweep(mut self) -> Self {
        self.sweep = false;
        self
    }

    /// Keep fetch order instead of ranking. Entries are still scored.
    pub fn without_ranking(mut self) -> Self {
        self.ranked = false;
        self
    }

    /// Load and rank the items matching `filter` at the clock's current instant.
    pub fn load(&self, filter: &ItemFilter) -> Result<BoardView> {
        self.load_at(filter, self.clock.now())
    }

    /// Load and rank the items matching `filter` at an explicit `now`.
    pub fn load_at(&self, filter: &ItemFilter, now: DateTime<Utc>) -> Result<BoardView> {
        let started = Instant::now();
        let view = view_label(filter);

        let mut items = self.source.fetch_items(filter)?;
        let span = start_board_span(view, items.len());

        let mut flagged = Vec::new();
        let mut warnings = Vec::new();

        if self.sweep {
            let stale: Vec<(WorkId, Status)> = sweep(&items, now)
                .into_iter()
                .map(|item| (item.id, item.status))
                .collect();
            span.record("board.flagged", stale.len());

            for (id, from) in stale {
                match self.sink.persist_status(id, Status::Overdue) {
                    Ok(()) => {
                        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                            item.status = Status::Overdue;
                        }
                        record_status_transition(&span, id, from, Status::Overdue);
                        metrics::status_transitions().add(
                            1,
                            &[
                                KeyValue::new("from", from.as_str()),
                                KeyValue::new("to", Status::Overdue.as_str()),
                            ],
                        );
                        flagged.push(id);
                    }
                    Err(e) => {
                        warn!(work_id = %id, error = %e, "failed to persist overdue transition");
                        metrics::sweep_persist_failures().add(1, &[KeyValue::new("view", view)]);
                        warnings.push(Warning::PersistFailed {
                            id,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            if !flagged.is_empty() {
                metrics::sweep_flagged().add(flagged.len() as u64, &[KeyValue::new("view", view)]);
            }
        }

        let entries = if self.ranked {
            rank(items, now)
        } else {
            items
                .into_iter()
                .map(|item| RankedItem::new(item, now))
                .collect()
        };

        metrics::schedule_duration_ms().record(
            started.elapsed().as_secs_f64() * 1000.0,
            &[KeyValue::new("view", view)],
        );
        span.in_scope(|| {
            debug!(
                items = entries.len(),
                flagged = flagged.len(),
                warnings = warnings.len(),
                "board loaded"
            );
        });

        Ok(BoardView {
            now,
            entries,
            flagged,
            warnings,
        })
    }
}

/// Newest-first views over notices and documents.
pub struct NoticeBoard<'a, S> {
    source: &'a S,
}

impl<'a, S> NoticeBoard<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }
}

impl<S: NoticeSource> NoticeBoard<'_, S> {
    pub fn notices(&self) -> Result<Vec<Notice>> {
        Ok(order_by_date_descending(self.source.fetch_notices()?))
    }
}

impl<S: DocumentSource> NoticeBoard<'_, S> {
    pub fn documents(&self) -> Result<Vec<Document>> {
        Ok(order_by_date_descending(self.source.fetch_documents()?))
    }
}
