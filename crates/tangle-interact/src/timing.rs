#![forbid(unsafe_code)]

//! Explicit timer gates: throttle and debounce.
//!
//! Both gates are plain values driven entirely by `Instant` parameters;
//! there is no hidden clock and no scheduler. The host event loop feeds
//! `now` in, which keeps every timing decision reproducible in tests.
//!
//! # Design
//!
//! [`Throttle`] is leading-plus-trailing with a latest-wins pending slot:
//! the first value of a burst fires immediately, later values within the
//! window replace each other, and [`Throttle::poll`] delivers the survivor
//! once the window has passed. That guarantees the first and last values
//! of a burst are never dropped.
//!
//! [`Debounce`] holds one value and delivers it once its delay passed
//! without a newer arm. [`Debounce::fire_now`] short-circuits the wait for
//! forced commits.

use web_time::{Duration, Instant};

/// Leading-plus-trailing rate limiter with a latest-wins pending slot.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fire: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: None,
        }
    }

    /// Submit a value at `now`.
    ///
    /// Returns `Some(value)` when the value should be applied immediately
    /// (leading edge), `None` when it was parked in the pending slot. A
    /// newer submission replaces whatever was pending.
    pub fn submit(&mut self, value: T, now: Instant) -> Option<T> {
        match self.last_fire {
            Some(fired) if now.duration_since(fired) < self.interval => {
                self.pending = Some(value);
                None
            }
            _ => {
                self.last_fire = Some(now);
                self.pending = None;
                Some(value)
            }
        }
    }

    /// Trailing edge: hand out the pending value once the interval has
    /// passed since the last fire.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.pending.as_ref()?;
        match self.last_fire {
            Some(fired) if now.duration_since(fired) < self.interval => None,
            _ => {
                self.last_fire = Some(now);
                self.pending.take()
            }
        }
    }

    /// Hand out the pending value immediately, ignoring the interval.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value and forget the firing history.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_fire = None;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Delivers the last armed value once its delay elapsed.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    armed: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    /// Arm (or re-arm) with `value`; the delay restarts at `now`.
    pub fn arm(&mut self, value: T, now: Instant) {
        self.armed = Some((now, value));
    }

    /// Deliver the armed value once the delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.armed {
            Some((since, _)) if now.duration_since(*since) >= self.delay => {
                self.armed.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    /// Deliver the armed value immediately, ignoring the delay.
    pub fn fire_now(&mut self) -> Option<T> {
        self.armed.take().map(|(_, value)| value)
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
