//! Calendar-day clock used by the quota tracker.
//!
//! Quotas reset at midnight, not on a rolling 24h window, so the tracker only
//! ever asks "what date is it?". Tests swap in `ManualDayClock` to simulate
//! day changes without touching the system time.

use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

/// Source of "today" for quota bookkeeping.
pub trait DayClock: Send + Sync + std::fmt::Debug {
    fn today(&self) -> NaiveDate;

    /// Wall-clock time in the same zone as `today()`. Used to schedule the
    /// daily sweep.
    fn now(&self) -> NaiveDateTime;
}

/// System clock in either the process-local zone or a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDayClock {
    offset: Option<FixedOffset>,
}

impl SystemDayClock {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }
}

impl DayClock for SystemDayClock {
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn now(&self) -> NaiveDateTime {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

#[cfg(test)]
pub use manual::ManualDayClock;
