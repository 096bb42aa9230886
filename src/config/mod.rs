//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing.

use crate::error::{Error, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON data file backing the store.
    pub data_path: PathBuf,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let data_path = PathBuf::from(required_var("OFFICEFLOW_DATA")?);
        Ok(Self {
            data_path,
            otel_endpoint: std::env::var("OTEL_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(Error::Config(format!(
            "environment variable {name} is set but empty"
        ))),
        Err(_) => Err(Error::Config(format!(
            "required environment variable {name} is not set"
        ))),
    }
}
