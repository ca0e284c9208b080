//! Single-slot throttle for outbound classifier requests

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Minimum spacing between actual dispatches
    pub min_interval: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            // 5 requests per second
            min_interval: Duration::from_millis(200),
        }
    }
}

/// Enforces a global minimum spacing between outbound classifier calls.
///
/// This is a single-slot throttle, not a token bucket: each caller computes
/// its dispatch time relative to the latest known dispatch, so simultaneous
/// arrivals serialize at exactly `min_interval` spacing. Spacing is measured
/// between actual sends, not arrival times, which prevents burst buildup
/// when calls arrive faster than the limit.
pub struct RateLimiter {
    config: RateLimiterConfig,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Create with default configuration
    pub fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }

    /// Reserve the next dispatch slot.
    ///
    /// Returns the instant at which the caller may send; the caller sleeps
    /// out the difference from `now`. The read-modify-write of the last
    /// dispatch time is a critical section: concurrent callers interleaved
    /// by the event loop must each observe the previous caller's slot.
    pub fn schedule(&self, now: Instant) -> Instant {
        let mut last = self.last_dispatch.lock().unwrap();

        let dispatch_at = match *last {
            Some(previous) => now.max(previous + self.config.min_interval),
            None => now,
        };

        *last = Some(dispatch_at);
        dispatch_at
    }

    /// Delay the caller must wait before sending, if any
    pub fn delay_from(&self, now: Instant) -> Duration {
        self.schedule(now).saturating_duration_since(now)
    }

    /// Minimum spacing this limiter enforces
    pub fn min_interval(&self) -> Duration {
        self.config.min_interval
    }
}
