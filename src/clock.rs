//! Clock injection.
//!
//! Nothing in the engine reads the wall clock directly. Entry points take a
//! `now` snapshot, and the board takes it from a [`Clock`] exactly once per pass.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant. Used in tests and for `--now` overrides.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Convert raw epoch milliseconds into an instant.
///
/// NaN, infinities, and values outside chrono's representable range are
/// rejected. Fractional milliseconds are truncated.
pub fn instant_from_millis(millis: f64) -> Result<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(Error::InvalidClock(format!("non-finite instant: {millis}")));
    }
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(Error::InvalidClock(format!("instant out of range: {millis}")));
    }
    Utc.timestamp_millis_opt(millis.trunc() as i64)
        .single()
        .ok_or_else(|| Error::InvalidClock(format!("instant out of range: {millis}")))
}
