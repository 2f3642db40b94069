//! Wall-clock plumbing for the simulation loops.
//!
//! Every loop measures the real elapsed time since its previous firing
//! instead of assuming its nominal cadence, so a throttled or backgrounded
//! host still credits the full interval. Timestamps are epoch milliseconds.

use std::cell::Cell;
use std::rc::Rc;

/// Source of the current wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// The host clock (`Date.now()` in the browser, `SystemTime` natively).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests and the balance simulator.
/// Clones share the same underlying time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Measures the elapsed time between consecutive firings of a loop.
#[derive(Clone, Debug)]
pub struct DeltaTimer {
    last_timestamp: u64,
}

impl DeltaTimer {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_timestamp: now_ms,
        }
    }

    /// Seconds elapsed since the previous call (or construction).
    ///
    /// Returns `None` when no time has passed or the clock went backwards;
    /// the watermark is left untouched in that case so the next firing
    /// measures from the last good timestamp.
    pub fn measure(&mut self, now_ms: u64) -> Option<f64> {
        if now_ms <= self.last_timestamp {
            return None;
        }
        let delta = (now_ms - self.last_timestamp) as f64 / 1000.0;
        self.last_timestamp = now_ms;
        Some(delta)
    }
}

/// A repeating timer with a fixed nominal period.
#[derive(Clone, Debug)]
pub struct Interval {
    period_ms: u64,
    next_due: u64,
}

impl Interval {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due: now_ms + period_ms,
        }
    }

    /// Whether the timer fires at `now_ms`. A late host fires once and
    /// reschedules from `now_ms`; missed periods are not replayed (each loop
    /// measures its own delta instead).
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due {
            return false;
        }
        self.next_due = now_ms + self.period_ms;
        true
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }
}
