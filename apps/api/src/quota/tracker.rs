//! Per-caller daily quota tracker.
//!
//! Each caller key owns one `QuotaRecord` holding the calendar day it applies
//! to and the number of admitted operations on that day. Records roll over
//! lazily: the first write on a new day resets the count before anything else
//! happens, and reads treat a stale record as empty without touching it.
//!
//! Locking is two-level. The `DashMap` shard lock is held only while fetching
//! or inserting the record's `Arc`; the admission sequence itself runs under
//! the record's own `Mutex`, so callers on different keys never wait on each
//! other's critical sections.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::ConfigError;
use crate::quota::clock::DayClock;

#[derive(Debug)]
struct QuotaRecord {
    day: NaiveDate,
    count: u32,
    /// Set when the record is removed from the map. An admission that fetched
    /// the record just before removal must retry against the live entry.
    retired: bool,
}

impl QuotaRecord {
    fn new(day: NaiveDate) -> Self {
        Self {
            day,
            count: 0,
            retired: false,
        }
    }

    fn count_on(&self, today: NaiveDate) -> u32 {
        if self.day == today {
            self.count
        } else {
            0
        }
    }
}

/// Usage snapshot for a single caller, as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaUsage {
    pub used: u32,
    pub remaining: u32,
    pub ceiling: u32,
}

#[derive(Debug)]
pub struct QuotaTracker {
    ceiling: u32,
    records: DashMap<String, Arc<Mutex<QuotaRecord>>>,
    clock: Arc<dyn DayClock>,
}

impl QuotaTracker {
    /// Builds a tracker with the given daily ceiling.
    ///
    /// The ceiling arrives as a signed value because that is how it is
    /// configured; anything below zero is rejected here so no call site ever
    /// sees an invalid tracker.
    pub fn new(ceiling: i64, clock: Arc<dyn DayClock>) -> Result<Self, ConfigError> {
        if ceiling < 0 {
            return Err(ConfigError::NegativeCeiling(ceiling));
        }
        let ceiling = u32::try_from(ceiling).map_err(|_| ConfigError::InvalidValue {
            var: "daily ceiling".to_string(),
            value: ceiling.to_string(),
        })?;

        Ok(Self {
            ceiling,
            records: DashMap::new(),
            clock,
        })
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Admits one operation for `key` if today's count is below the ceiling.
    pub fn try_admit(&self, key: &str) -> bool {
        let today = self.clock.today();

        loop {
            let record = self.record_for(key, today);
            let mut rec = lock(&record);
            if rec.retired {
                continue;
            }

            if rec.day != today {
                info!(
                    key,
                    previous_day = %rec.day,
                    previous_count = rec.count,
                    "New day detected, resetting quota counter"
                );
                rec.day = today;
                rec.count = 0;
            }

            if rec.count >= self.ceiling {
                warn!(key, day = %today, ceiling = self.ceiling, "Daily quota exceeded");
                return false;
            }

            rec.count += 1;
            debug!(
                key,
                day = %today,
                count = rec.count,
                ceiling = self.ceiling,
                "Quota admission granted"
            );
            return true;
        }
    }

    #[allow(dead_code)]
    pub fn remaining(&self, key: &str) -> u32 {
        self.ceiling.saturating_sub(self.used(key))
    }

    pub fn used(&self, key: &str) -> u32 {
        let today = self.clock.today();
        // Clone the Arc out so the shard read lock is released before locking
        // the record.
        let record = match self.records.get(key) {
            Some(entry) => Arc::clone(entry.value()),
            None => return 0,
        };
        let rec = lock(&record);
        rec.count_on(today)
    }

    pub fn usage(&self, key: &str) -> QuotaUsage {
        let used = self.used(key);
        QuotaUsage {
            used,
            remaining: self.ceiling.saturating_sub(used),
            ceiling: self.ceiling,
        }
    }

    /// Drops the record for `key`. Administrative action.
    #[allow(dead_code)]
    pub fn reset(&self, key: &str) {
        if let Some((_, record)) = self.records.remove(key) {
            lock(&record).retired = true;
        }
        info!(key, "Daily quota reset");
    }

    /// Removes every record whose day precedes `reference_day` and returns the
    /// number removed.
    pub fn sweep(&self, reference_day: NaiveDate) -> usize {
        let mut removed = 0;
        self.records.retain(|_, record| {
            let mut rec = lock(record);
            if rec.day < reference_day {
                rec.retired = true;
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            info!(removed, %reference_day, "Quota sweep removed stale records");
        } else {
            debug!(%reference_day, "Quota sweep found no stale records");
        }
        removed
    }

    pub fn tracked_key_count(&self) -> usize {
        self.records.len()
    }

    pub fn clock(&self) -> &Arc<dyn DayClock> {
        &self.clock
    }

    fn record_for(&self, key: &str, today: NaiveDate) -> Arc<Mutex<QuotaRecord>> {
        if let Some(entry) = self.records.get(key) {
            return Arc::clone(entry.value());
        }
        let entry = self
            .records
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(QuotaRecord::new(today))));
        Arc::clone(entry.value())
    }
}

/// Records hold plain counters, so a panic mid-update cannot leave them in a
/// state worse than the values already written.
fn lock(record: &Mutex<QuotaRecord>) -> MutexGuard<'_, QuotaRecord> {
    record.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
