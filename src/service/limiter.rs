//! Per-caller request throttling.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Counting window for one caller identity.
#[derive(Debug, Clone)]
struct RateLimitWindow {
    count: u32,
    window_reset_at: DateTime<Utc>,
}

/// Fixed-window rate limiter keyed by caller identity.
///
/// The count is zeroed once the window's expiry passes; requests beyond
/// `max_requests` inside a window are rejected. A `max_requests` of 0
/// disables limiting entirely. Internally synchronized for concurrent
/// callers.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, RateLimitWindow>>,
    max_requests: u32,
    window: TimeDelta,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Admit or reject a request from `identity`.
    ///
    /// Rejections carry the whole seconds remaining until the window resets
    /// (at least 1), suitable as a retry-after hint.
    pub fn check(&self, identity: &str) -> Result<(), u64> {
        if self.max_requests == 0 {
            return Ok(());
        }

        let now = Utc::now();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let reset_at = now
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let entry = windows
            .entry(identity.to_string())
            .or_insert_with(|| RateLimitWindow {
                count: 0,
                window_reset_at: reset_at,
            });

        if now >= entry.window_reset_at {
            entry.count = 0;
            entry.window_reset_at = reset_at;
        }

        if entry.count >= self.max_requests {
            let remaining = (entry.window_reset_at - now).num_seconds().max(1) as u64;
            return Err(remaining);
        }

        entry.count += 1;
        Ok(())
    }
}
