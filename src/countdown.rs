//! Time remaining until the next UTC day boundary.

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};

use crate::consts::{
    COUNTDOWN_SEPARATOR, MAX_NANOSECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Time left until the next UTC midnight, ordered as a duration.
///
/// Renders as `HH:MM:SS` with every field floored to whole units. The value
/// lies in `(0, 24h]`: exactly `24:00:00` at midnight itself, and
/// `00:00:00` only during the final second of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Countdown(TimeDelta);

impl Countdown {
    /// Whole hours remaining (0-24)
    pub fn hours(self) -> i64 {
        self.0.num_seconds() / SECONDS_PER_HOUR
    }

    /// Whole minutes past the hour field (0-59)
    pub fn minutes(self) -> i64 {
        (self.0.num_seconds() / SECONDS_PER_MINUTE) % 60
    }

    /// Whole seconds past the minute field (0-59)
    pub fn seconds(self) -> i64 {
        self.0.num_seconds() % SECONDS_PER_MINUTE
    }

    /// The exact remaining time, including sub-second precision
    pub const fn as_duration(self) -> TimeDelta {
        self.0
    }

    pub fn to_std(self) -> std::time::Duration {
        self.0.to_std().unwrap_or_default()
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{sep}{:02}{sep}{:02}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            sep = COUNTDOWN_SEPARATOR
        )
    }
}

impl serde::Serialize for Countdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Time from `now` until the first UTC midnight strictly after it.
///
/// Computed as one day minus the time already elapsed on `now`'s date, so it
/// is total over every representable instant. A leap second counts as the
/// last instant of its day.
pub fn remaining(now: DateTime<Utc>) -> Countdown {
    let time = now.time();
    let elapsed = TimeDelta::seconds(i64::from(time.num_seconds_from_midnight()))
        + TimeDelta::nanoseconds(i64::from(time.nanosecond().min(MAX_NANOSECOND)));
    Countdown(TimeDelta::seconds(SECONDS_PER_DAY) - elapsed)
}

/// The first UTC midnight strictly after `now`, or `None` past chrono's range
pub fn next_midnight(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    now.date_naive()
        .succ_opt()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
