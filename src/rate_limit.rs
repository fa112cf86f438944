use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use log::warn;

/// Time source for the limiter, injected so tests can advance time without
/// sleeping.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Fixed-window quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    /// The original deployment's send-code quota.
    fn default() -> Self {
        Self {
            window: Duration::from_secs(24 * 60 * 60),
            max_requests: 6000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: u64,
}

/// Per-key fixed-window request counter.
///
/// The read-then-increment for one key happens under that key's map entry,
/// so concurrent requests from the same source cannot undercount. Windows
/// reset lazily on the first request after expiry.
#[derive(Debug)]
pub struct RateLimiter<C: Clock = SystemClock> {
    windows: DashMap<String, Window>,
    config: RateLimitConfig,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            windows: DashMap::new(),
            config,
            clock,
        }
    }

    /// Counts one request against `key`. Returns whether it is allowed
    /// within the current window.
    pub fn try_consume(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        let window_ms = self.config.window.as_millis() as u64;
        let mut allowed = true;
        self.windows
            .entry(key.to_string())
            .and_modify(|window| {
                if now > window.reset_at {
                    window.count = 1;
                    window.reset_at = now + window_ms;
                } else if window.count >= self.config.max_requests {
                    allowed = false;
                } else {
                    window.count += 1;
                }
            })
            .or_insert_with(|| Window {
                count: 1,
                reset_at: now + window_ms,
            });
        if !allowed {
            warn!("rate limit exceeded for key {:?}", key);
        }
        allowed
    }

    /// How long until the current window for `key` resets. `None` when no
    /// window is open or it has already expired.
    pub fn retry_after(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_millis();
        self.windows.get(key).and_then(|window| {
            window
                .reset_at
                .checked_sub(now)
                .filter(|remaining| *remaining > 0)
                .map(Duration::from_millis)
        })
    }
}
