//! # officeflow
//!
//! Prioritization and lifecycle engine for office work items.
//!
//! Ranks tasks by urgency, detects tasks whose deadline has elapsed and
//! flags them Overdue, and orders notices and documents newest-first.
//! Persistence is an external collaborator reached through the `store` ports;
//! every computation takes an explicit `now` so results are reproducible.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod store;
pub mod telemetry;
