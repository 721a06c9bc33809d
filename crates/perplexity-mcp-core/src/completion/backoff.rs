//! Poll interval schedule for async jobs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for the async poll loop
///
/// Intervals are whole seconds; growth uses integer arithmetic, so the
/// default policy yields 3, 4, 5, 6, 8, 8, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    /// First sleep before the first status check
    pub initial_interval_secs: u64,
    /// Upper bound for the sleep between checks
    pub max_interval_secs: u64,
    /// Number of status checks before giving up
    pub max_polls: u32,
}

impl PollPolicy {
    pub const DEFAULT_INITIAL_INTERVAL_SECS: u64 = 3;
    pub const DEFAULT_MAX_INTERVAL_SECS: u64 = 8;
    pub const DEFAULT_MAX_POLLS: u32 = 40;

    /// Schedule of sleeps, one per poll
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule::new(self.initial_interval_secs, self.max_interval_secs)
    }

    /// Upper bound on the total time spent sleeping
    pub fn max_total_wait(&self) -> Duration {
        self.schedule()
            .take(self.max_polls as usize)
            .sum()
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval_secs: Self::DEFAULT_INITIAL_INTERVAL_SECS,
            max_interval_secs: Self::DEFAULT_MAX_INTERVAL_SECS,
            max_polls: Self::DEFAULT_MAX_POLLS,
        }
    }
}

/// Infinite iterator of poll intervals
///
/// After each interval below the cap, the next one is `current * 4 / 3`,
/// clamped to the cap.
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    current: u64,
    max: u64,
}

impl BackoffSchedule {
    pub fn new(initial_secs: u64, max_secs: u64) -> Self {
        Self {
            current: initial_secs,
            max: max_secs,
        }
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let interval = self.current;
        if self.current < self.max {
            self.current = (self.current.saturating_mul(4) / 3).min(self.max);
        }
        Some(Duration::from_secs(interval))
    }
}
