use crate::consts::{DATE_SEPARATOR, MAX_MONTH, MAX_YEAR, MIN_YEAR};
use crate::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use std::str::FromStr;

/// A UTC calendar date at day precision, limited to years `MIN_YEAR..=MAX_YEAR`
/// so that it always renders as exactly `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct CalendarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from its components, validating each one
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth` or `InvalidDay` for the first
    /// component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(i32::from(year)));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .map(Self)
            .ok_or(ParseError::InvalidDay { year, month, day })
    }

    /// The UTC date `instant` falls on
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if that date is outside the supported years.
    pub fn from_instant(instant: DateTime<Utc>) -> Result<Self, ParseError> {
        Self::try_from(instant.date_naive())
    }

    // Years are validated on construction, so the narrowing casts below are lossless.

    /// Returns the year component
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(self) -> u16 {
        self.0.year() as u16
    }

    /// Returns the month component (1-12)
    #[allow(clippy::cast_possible_truncation)]
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    /// Returns the day-of-month component
    #[allow(clippy::cast_possible_truncation)]
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    /// The underlying chrono date
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, or `None` after `MAX_YEAR`-12-31
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().and_then(|next| Self::try_from(next).ok())
    }

    /// The UTC instant at which this date begins
    pub fn midnight(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// Long human form, e.g. `Monday, January 1, 2024`
    pub fn label(self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }

    /// Rejects anything but exactly `width` ASCII digits, so only the
    /// canonical `YYYY-MM-DD` spelling parses
    fn check_digits(s: &str, width: usize) -> Result<(), ParseError> {
        if s.len() == width && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat(s.to_owned()))
        }
    }

    fn parse_u16(s: &str, width: usize) -> Result<u16, ParseError> {
        Self::check_digits(s, width)?;
        s.parse::<u16>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str, width: usize) -> Result<u8, ParseError> {
        Self::check_digits(s, width)?;
        s.parse::<u8>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses the ISO form `YYYY-MM-DD`; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY-MM-DD with 2 {} separators, found {}",
                DATE_SEPARATOR,
                parts.len() - 1
            )));
        };

        Self::new(
            Self::parse_u16(year, 4)?,
            Self::parse_u8(month, 2)?,
            Self::parse_u8(day, 2)?,
        )
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = date.year();
        if year < i32::from(MIN_YEAR) || year > i32::from(MAX_YEAR) {
            return Err(ParseError::InvalidYear(year));
        }
        Ok(Self(date))
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
