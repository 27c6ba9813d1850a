//! Monotonic time sources and the round timer.
//!
//! All interval math goes through [`Instant`], never wall-clock time, so elapsed
//! values cannot go negative or jump when the system clock is adjusted.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of "now" for every transition and query.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Useful for deterministic tests and for replaying a recorded session.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut off = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *off += by;
    }

    /// Move to an absolute offset from creation. Never moves backwards.
    pub fn set_elapsed(&self, at: Duration) {
        let mut off = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        if at > *off {
            *off = at;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let off = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.base + *off
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Elapsed time banked across the segments of one round.
///
/// The timer itself does not know whether it is running; the round phase owns
/// the segment start instant and hands it in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundTimer {
    accumulated: Duration,
}

impl RoundTimer {
    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Close a segment that began at `started_at` and return the new total.
    pub fn bank(&mut self, started_at: Instant, now: Instant) -> Duration {
        self.accumulated += segment(started_at, now);
        self.accumulated
    }

    /// Live total for a segment still running.
    #[inline]
    pub fn running_total(&self, started_at: Instant, now: Instant) -> Duration {
        self.accumulated + segment(started_at, now)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[inline]
fn segment(started_at: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(started_at)
}
