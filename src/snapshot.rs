//! Per-tick view for presenters.
//!
//! A presenter polls a [`Ticker`] every [`TICK_INTERVAL`](crate::TICK_INTERVAL)
//! and renders the returned [`Snapshot`]. Snapshots are owned and immutable;
//! the only state between ticks is the ticker's cached key for the current
//! date.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::{CalendarDate, Clock, Countdown, DailyKey, KeyVersion, ParseError, countdown};

/// Everything a presenter shows at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    date: CalendarDate,
    key: DailyKey,
    countdown: Countdown,
    valid_from: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Snapshot {
    /// Computes the snapshot for `now` with the current key version.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if `now` falls outside the supported years.
    pub fn at(now: DateTime<Utc>) -> Result<Self, ParseError> {
        let date = CalendarDate::from_instant(now)?;
        Ok(Self::assemble(now, date, KeyVersion::CURRENT.derive(date)))
    }

    fn assemble(now: DateTime<Utc>, date: CalendarDate, key: DailyKey) -> Self {
        let valid_from = date.midnight();
        Self {
            date,
            key,
            countdown: countdown::remaining(now),
            valid_from,
            // Dates stop at 9999-12-31, far inside chrono's range.
            expires_at: valid_from + TimeDelta::days(1),
        }
    }

    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    pub const fn key(&self) -> &DailyKey {
        &self.key
    }

    pub const fn countdown(&self) -> Countdown {
        self.countdown
    }

    /// Midnight UTC at which this key took effect
    pub const fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    /// Midnight UTC at which the next key takes over
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether `instant` lies in `[valid_from, expires_at)`
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        self.valid_from <= instant && instant < self.expires_at
    }

    /// Long form of the date for display, e.g. `Monday, January 1, 2024`
    pub fn label(&self) -> String {
        self.date.label()
    }
}

/// Produces snapshots from a clock, deriving each day's key once.
#[derive(Debug, Clone)]
pub struct Ticker<C> {
    clock: C,
    version: KeyVersion,
    current: Option<(CalendarDate, DailyKey)>,
    rollovers: u64,
}

impl<C: Clock> Ticker<C> {
    pub const fn new(clock: C) -> Self {
        Self::with_version(clock, KeyVersion::CURRENT)
    }

    pub const fn with_version(clock: C, version: KeyVersion) -> Self {
        Self {
            clock,
            version,
            current: None,
            rollovers: 0,
        }
    }

    /// Reads the clock and returns a fresh snapshot.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the clock reads outside the supported years.
    pub fn tick(&mut self) -> Result<Snapshot, ParseError> {
        let now = self.clock.now();
        let date = CalendarDate::from_instant(now)?;

        let cached = self
            .current
            .as_ref()
            .filter(|(cached_date, _)| *cached_date == date)
            .map(|(_, key)| key.clone());

        let key = match cached {
            Some(key) => key,
            None => {
                let key = self.version.derive(date);
                tracing::debug!(%date, %key, version = %self.version, "daily key rolled over");
                self.current = Some((date, key.clone()));
                self.rollovers += 1;
                key
            }
        };

        Ok(Snapshot::assemble(now, date, key))
    }

    /// Key cached for the most recent tick, if any
    pub fn current_key(&self) -> Option<&DailyKey> {
        self.current.as_ref().map(|(_, key)| key)
    }

    /// Number of times a new key has been derived
    pub const fn rollovers(&self) -> u64 {
        self.rollovers
    }

    pub const fn version(&self) -> KeyVersion {
        self.version
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
