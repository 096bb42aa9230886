//! Prioritization and lifecycle engine.
//!
//! Everything here is pure and synchronous over an input collection and an
//! explicit `now`, except [`board`], which wires the pure pieces to the
//! store ports.

pub mod board;
pub mod chrono_order;
pub mod lifecycle;
pub mod query;
pub mod report;
pub mod schedule;
pub mod score;
pub mod sweep;

pub use board::{BoardView, NoticeBoard, TaskBoard, Warning};
pub use chrono_order::order_by_date_descending;
pub use lifecycle::{Trigger, can_transition, effective_status, validate_transition};
pub use query::TaskQuery;
pub use report::{ReportPeriod, StatusSummary, UserTally, monthly_completed, user_tallies};
pub use schedule::{RankedItem, rank, schedule};
pub use score::{days_until, score};
pub use sweep::sweep;
