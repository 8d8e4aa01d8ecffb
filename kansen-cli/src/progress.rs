//! Periodic progress reporting during long Monte Carlo runs.

use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use kansen_core::TrialObserver;
use tracing::{debug, info};

/// Logs each finished trial at `debug` and emits an `info` progress event
/// whenever `interval` has elapsed since the previous report.
#[derive(Debug)]
pub struct ProgressObserver {
    interval: Duration,
    started: Instant,
    last_report: Mutex<Instant>,
}

impl ProgressObserver {
    /// Starts the clock for a run reporting every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            started: now,
            last_report: Mutex::new(now),
        }
    }

    /// Returns the configured reporting interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn report_due(&self, now: Instant) -> bool {
        let mut last = self
            .last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if now.saturating_duration_since(*last) < self.interval {
            return false;
        }
        *last = now;
        true
    }
}

impl TrialObserver for ProgressObserver {
    fn on_trial_complete(&self, completed: usize, total: usize) {
        debug!(completed, total, "simulation finished");
        let now = Instant::now();
        if self.report_due(now) {
            let elapsed = now.saturating_duration_since(self.started);
            info!(
                completed,
                total,
                elapsed_hours = elapsed.as_secs() / 3600,
                elapsed_secs = elapsed.as_secs(),
                "simulation progress"
            );
        }
    }
}
