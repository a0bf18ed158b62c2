//! Sources of the current instant.

use chrono::{DateTime, TimeDelta, Utc};

/// Abstraction over "now" so tickers can run against a fixed time in tests.
pub trait Clock {
    /// Returns the current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Moves the clock forward (or back, for a negative delta)
    pub fn advance(&mut self, delta: TimeDelta) {
        self.now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
