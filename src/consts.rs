/// Earliest supported year (inclusive)
pub const MIN_YEAR: u16 = 1;

/// Latest supported year (inclusive), the last one with a four-digit `YYYY`
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Symbols a key character is drawn from, indexed by the LCG output
pub const KEY_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// LCG multiplier of key version 1
pub const LCG_MULTIPLIER: u64 = 9301;
/// LCG increment of key version 1
pub const LCG_INCREMENT: u64 = 49297;
/// LCG modulus of key version 1
pub const LCG_MODULUS: u64 = 233_280;

/// Characters per key group
pub const KEY_GROUP_LEN: usize = 4;
/// Groups per key
pub const KEY_GROUPS: usize = 4;
/// Separator placed between key groups
pub const KEY_SEPARATOR: char = '-';
/// Number of alphabet characters drawn from the LCG
pub const KEY_CHARS: usize = KEY_GROUP_LEN * KEY_GROUPS;
/// Length of a formatted key: `XXXX-XXXX-XXXX-XXXX`
pub const KEY_LEN: usize = KEY_CHARS + KEY_GROUPS - 1;

/// Separator between countdown fields (`HH:MM:SS`)
pub const COUNTDOWN_SEPARATOR: char = ':';

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Last valid nanosecond within a second; chrono encodes leap seconds above it
pub(crate) const MAX_NANOSECOND: u32 = 999_999_999;

/// Cadence at which a presenter is expected to poll [`crate::Ticker::tick`]
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);
