//! Span helpers for board loads.

use tracing::Span;

use crate::model::{Status, WorkId};

/// Start a span covering one board load.
///
/// `board.flagged` is declared empty and filled in once the sweep has run.
pub fn start_board_span(view: &str, item_count: usize) -> Span {
    tracing::info_span!(
        "board.load",
        "board.view" = view,
        "board.items" = item_count,
        "board.flagged" = tracing::field::Empty,
    )
}

/// Record a committed status transition on `span`.
pub fn record_status_transition(span: &Span, id: WorkId, from: Status, to: Status) {
    span.in_scope(|| {
        tracing::info!(work_id = %id, from = %from, to = %to, "status_transition");
    });
}
