//! Deterministic daily keys.
//!
//! Every UTC calendar day maps to a key of the form `XXXX-XXXX-XXXX-XXXX`.
//! Any implementation of the same [`KeyVersion`] produces the same key for
//! the same date. The key is a shared daily token and carries no
//! cryptographic strength.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use daily_key::{CalendarDate, derive, remaining};
//!
//! let date: CalendarDate = "2024-01-01".parse().unwrap();
//! assert_eq!(derive(date).as_str(), "SKU3-2YPE-03XF-N3LR");
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
//! assert_eq!(remaining(now).to_string(), "00:00:01");
//! ```

mod clock;
mod consts;
mod countdown;
mod date;
mod key;
mod prelude;
mod snapshot;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;
pub use countdown::{Countdown, next_midnight, remaining};
pub use date::{CalendarDate, ParseError};
pub use key::{DailyKey, KeyError, KeyVersion, seed};
pub use snapshot::{Snapshot, Ticker};

/// Derives the key for `date` with [`KeyVersion::CURRENT`].
pub fn derive(date: CalendarDate) -> DailyKey {
    KeyVersion::CURRENT.derive(date)
}
