//! Daily background sweep of stale quota records.
//!
//! Correctness never depends on this task; it only bounds memory by dropping
//! callers that have not been seen since a previous day.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;
use tracing::info;

use crate::quota::tracker::QuotaTracker;

/// Time of day the sweep runs, shortly after midnight.
pub fn sweep_time() -> NaiveTime {
    NaiveTime::MIN + chrono::Duration::minutes(5)
}

/// Spawns the sweep loop on the current tokio runtime.
pub fn spawn_daily_sweep(tracker: Arc<QuotaTracker>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let delay = delay_until_next_sweep(tracker.clock().now(), sweep_time());
            info!("Next quota sweep in {}s", delay.as_secs());
            tokio::time::sleep(delay).await;

            let today = tracker.clock().today();
            let removed = tracker.sweep(today);
            info!(
                removed,
                tracked = tracker.tracked_key_count(),
                "Daily quota sweep complete"
            );
        }
    })
}

/// Time from `now` until the next occurrence of `at`. If `now` is exactly
/// `at`, the next run is a full day away.
pub fn delay_until_next_sweep(now: NaiveDateTime, at: NaiveTime) -> Duration {
    let today_run = now.date().and_time(at);
    let next = if today_run > now {
        today_run
    } else {
        today_run + chrono::Duration::days(1)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
