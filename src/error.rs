//! Error types for officeflow.

use thiserror::Error;

use crate::model::Status;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid clock instant: {0}")]
    InvalidClock(String),

    #[error("invalid status transition ({trigger}): {from} -> {to}")]
    InvalidTransition {
        from: Status,
        to: Status,
        trigger: crate::engine::lifecycle::Trigger,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
