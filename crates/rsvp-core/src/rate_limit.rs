//! Count-per-window admission policy keyed by phone number.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::RateLimitConfig;
use crate::constants::{DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_HOURS};

/// ## Summary
/// At most `max_submissions` accepted submissions per phone within the
/// trailing `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_submissions: u32,
    pub window: TimeDelta,
}

impl RateLimitPolicy {
    #[must_use]
    pub fn new(max_submissions: u32, window_hours: u32) -> Self {
        Self {
            max_submissions,
            window: TimeDelta::hours(i64::from(window_hours)),
        }
    }

    /// Entries submitted strictly before this instant are expired.
    #[must_use]
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// ## Summary
    /// Returns true when `recent` unexpired submissions already exhaust the allowance.
    #[must_use]
    pub fn is_exceeded(&self, recent: i64) -> bool {
        recent >= i64::from(self.max_submissions)
    }

    #[must_use]
    pub fn window_hours(&self) -> i64 {
        self.window.num_hours()
    }

    /// Message returned to a rate-limited caller.
    #[must_use]
    pub fn retry_message(&self) -> String {
        format!(
            "Too many submissions from this phone number. Please try again in {} hours.",
            self.window_hours()
        )
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_HOURS)
    }
}

impl From<RateLimitConfig> for RateLimitPolicy {
    fn from(config: RateLimitConfig) -> Self {
        Self::new(config.max_submissions, config.window_hours)
    }
}
