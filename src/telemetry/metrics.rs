//! Metric instruments for officeflow.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an exporter these are no-ops.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("officeflow")
}

/// Counter: items flagged Overdue by a sweep.
/// Labels: `view`.
pub fn sweep_flagged() -> Counter<u64> {
    meter()
        .u64_counter("officeflow.sweep.flagged")
        .with_description("Work items flagged Overdue by the sweep")
        .build()
}

/// Counter: flagged transitions the store failed to persist.
/// Labels: `view`.
pub fn sweep_persist_failures() -> Counter<u64> {
    meter()
        .u64_counter("officeflow.sweep.persist_failures")
        .with_description("Overdue transitions that could not be persisted")
        .build()
}

/// Counter: status transitions committed.
/// Labels: `from`, `to`.
pub fn status_transitions() -> Counter<u64> {
    meter()
        .u64_counter("officeflow.status.transitions")
        .with_description("Number of work item status transitions")
        .build()
}

/// Histogram: time to build a ranked board, in milliseconds.
/// Labels: `view`.
pub fn schedule_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("officeflow.schedule.duration_ms")
        .with_description("Time to sweep and rank a task board")
        .with_unit("ms")
        .build()
}
