//! Time source and availability evaluation.
//!
//! Availability is the only part of a search that is allowed to depend on
//! the wall clock. Injecting [`Clock`] keeps that dependence at a single
//! seam: production code uses [`SystemClock`], tests pin a [`FixedClock`]
//! and get fully reproducible results.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Source of "now" for availability evaluation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A daily opening window in minutes since midnight UTC.
///
/// Windows may wrap past midnight (`open_minute > close_minute`). A window
/// with `open_minute == close_minute` is open all day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningHours {
    pub open_minute: u16,
    pub close_minute: u16,
}

impl OpeningHours {
    pub fn new(open_minute: u16, close_minute: u16) -> Self {
        Self {
            open_minute,
            close_minute,
        }
    }

    /// Whether the window contains the given instant.
    pub fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        let minute = (at.hour() * 60 + at.minute()) as u16;
        if self.open_minute == self.close_minute {
            return true;
        }
        if self.open_minute < self.close_minute {
            self.open_minute <= minute && minute < self.close_minute
        } else {
            // Wraps past midnight, e.g. 22:00-02:00.
            minute >= self.open_minute || minute < self.close_minute
        }
    }
}
