//! Timestamp-driven cooldowns.
//!
//! Nothing here schedules callbacks. The host passes a monotonic millisecond
//! clock (`performance.now()` in the browser) into every frame, and each
//! cooldown answers "is it still running at `now`?" by comparing timestamps.
//! A window started at `t` with duration `d` is active on `[t, t + d)`.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

/// A self-expiring window of fixed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    duration_ms: f64,
    started_at: Option<f64>,
}

impl Cooldown {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self { duration_ms, started_at: None }
    }

    /// Open (or restart) the window at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    /// Forget any running window.
    pub fn clear(&mut self) {
        self.started_at = None;
    }

    #[must_use]
    pub fn is_active(&self, now: f64) -> bool {
        self.remaining(now) > 0.0
    }

    /// Milliseconds left in the window; `0.0` when idle or expired.
    ///
    /// A clock that runs backwards (`now` before the start) keeps the window
    /// fully open rather than extending it.
    #[must_use]
    pub fn remaining(&self, now: f64) -> f64 {
        match self.started_at {
            Some(start) => {
                let elapsed = (now - start).max(0.0);
                (self.duration_ms - elapsed).max(0.0)
            }
            None => 0.0,
        }
    }

    /// Timestamp the current window was opened at, if one was.
    #[must_use]
    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}
