//! Wall-clock times and time ranges within a single event day.
//!
//! # Time Model
//! A [`ClockTime`] is a count of minutes since midnight. Its text form is
//! zero-padded 24h `"HH:MM"`, so lexicographic order on the text equals
//! chronological order. There is no wraparound: arithmetic past midnight
//! saturates instead of wrapping and yields values such as `24:30`. Only
//! `24:00` ([`ClockTime::END_OF_DAY`]) parses back; later values print but are
//! refused by drafts and slot checks.
//!
//! An [`Interval`] is half-open `[start, end)`. Its persisted text form is
//! `"HH:MM - HH:MM"`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separator between the two ends of a persisted time range.
pub const RANGE_SEPARATOR: &str = " - ";

/// Error raised when clock or range text is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// Text is not a valid `HH:MM` time of day.
    #[error("invalid clock time '{0}', expected HH:MM")]
    Clock(String),
    /// Text is not a valid `HH:MM - HH:MM` range.
    #[error("invalid time range '{0}', expected HH:MM - HH:MM")]
    Range(String),
}

/// A time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight (`00:00`).
    pub const MIDNIGHT: Self = Self(0);

    /// End of the day (`24:00`), the latest storable range end.
    pub const END_OF_DAY: Self = Self(24 * 60);

    /// Creates a clock time from minutes since midnight.
    #[inline]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Creates a clock time from hours and minutes.
    #[inline]
    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Returns this time shifted forward by `minutes`, saturating.
    #[inline]
    pub const fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Signed minute difference `self - earlier`.
    #[inline]
    pub fn minutes_since(self, earlier: Self) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "24:00" {
            return Ok(Self::END_OF_DAY);
        }
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| TimeParseError::Clock(s.to_string()))?;
        Ok(Self::from_hm(parsed.hour(), parsed.minute()))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A half-open time range [start, end) within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// Range start (inclusive).
    pub start: ClockTime,
    /// Range end (exclusive).
    pub end: ClockTime,
}

impl Interval {
    /// Creates a new interval. Does not check ordering; see [`Interval::is_valid`].
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Creates an interval of `minutes` length starting at `start`.
    pub const fn starting_at(start: ClockTime, minutes: u32) -> Self {
        Self::new(start, start.plus_minutes(minutes))
    }

    /// Signed length in minutes (`end - start`).
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.end.minutes_since(self.start)
    }

    /// Whether `start < end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Whether the range ends no later than `24:00`.
    #[inline]
    pub fn fits_in_day(&self) -> bool {
        self.end <= ClockTime::END_OF_DAY
    }

    /// Whether two intervals share at least one minute.
    ///
    /// Touching endpoints (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", self.start, self.end)
    }
}

impl FromStr for Interval {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| TimeParseError::Range(s.to_string()))?;
        let start = start
            .parse()
            .map_err(|_| TimeParseError::Range(s.to_string()))?;
        let end = end
            .parse()
            .map_err(|_| TimeParseError::Range(s.to_string()))?;
        Ok(Self::new(start, end))
    }
}

/// Parses a persisted `"HH:MM - HH:MM"` range.
///
/// Returns `None` for empty or malformed text; callers skip such blocks
/// instead of failing.
pub fn parse_interval(text: &str) -> Option<Interval> {
    if text.trim().is_empty() {
        return None;
    }
    text.parse().ok()
}

/// Serde adapter storing `Option<Interval>` as the single `time` string.
pub(crate) mod time_text {
    use super::{parse_interval, Interval};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Interval>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(interval) => serializer.collect_str(interval),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Interval>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        Ok(text.as_deref().and_then(parse_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_parse_and_format() {
        let t: ClockTime = "08:30".parse().unwrap();
        assert_eq!(t.minutes(), 510);
        assert_eq!(t.to_string(), "08:30");
        assert_eq!(ClockTime::from_hm(14, 5).to_string(), "14:05");
    }

    #[test]
    fn test_clock_rejects_garbage() {
        assert!("25:00".parse::<ClockTime>().is_err());
        assert!("12:61".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
        assert!("".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_past_midnight_prints_without_wrap() {
        let late = ClockTime::from_hm(23, 30).plus_minutes(60);
        assert_eq!(late.to_string(), "24:30");
    }

    #[test]
    fn test_clock_plus_minutes_saturates() {
        let t = ClockTime::from_hm(23, 30).plus_minutes(u32::MAX);
        assert_eq!(t.minutes(), u32::MAX);
        assert!(!Interval::starting_at(ClockTime::from_hm(23, 30), u32::MAX).fits_in_day());
    }

    #[test]
    fn test_end_of_day_parses_back() {
        assert_eq!("24:00".parse::<ClockTime>().unwrap(), ClockTime::END_OF_DAY);
        assert!("24:30".parse::<ClockTime>().is_err());
        assert!("24:01".parse::<ClockTime>().is_err());

        let last = parse_interval("23:30 - 24:00").unwrap();
        assert!(last.fits_in_day());
        assert_eq!(last.duration_minutes(), 30);
        assert_eq!(last.to_string(), "23:30 - 24:00");
    }

    #[test]
    fn test_interval_roundtrip_text() {
        let i = parse_interval("14:00 - 14:45").unwrap();
        assert_eq!(i.duration_minutes(), 45);
        assert_eq!(i.to_string(), "14:00 - 14:45");
    }

    #[test]
    fn test_parse_interval_missing_or_malformed() {
        assert_eq!(parse_interval(""), None);
        assert_eq!(parse_interval("   "), None);
        assert_eq!(parse_interval("14:00-14:45"), None);
        assert_eq!(parse_interval("14:00 - later"), None);
    }

    #[test]
    fn test_interval_overlap_half_open() {
        let a = parse_interval("09:00 - 10:00").unwrap();
        let b = parse_interval("09:30 - 10:30").unwrap();
        let c = parse_interval("10:00 - 11:00").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // touching
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_interval_validity() {
        let t = ClockTime::from_hm(9, 0);
        assert!(!Interval::new(t, t).is_valid());
        assert!(Interval::starting_at(t, 1).is_valid());
        assert!(!Interval::new(t.plus_minutes(5), t).is_valid());
    }

    #[test]
    fn test_clock_serde_as_text() {
        let json = serde_json::to_string(&ClockTime::from_hm(8, 0)).unwrap();
        assert_eq!(json, "\"08:00\"");
        let back: ClockTime = serde_json::from_str("\"18:00\"").unwrap();
        assert_eq!(back, ClockTime::from_hm(18, 0));
        assert!(serde_json::from_str::<ClockTime>("\"8 o'clock\"").is_err());
    }
}
