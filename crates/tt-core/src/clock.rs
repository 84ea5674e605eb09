use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockParseError {
    #[error("expected HH:MM, got {0:?}")]
    BadTime(String),
    #[error("hour out of range in {0:?}")]
    HourOutOfRange(String),
    #[error("minute out of range in {0:?}")]
    MinuteOutOfRange(String),
    #[error("expected \"HH:MM - HH:MM\", got {0:?}")]
    BadRange(String),
}

/// Wall-clock time of day at minute granularity.
///
/// Ordering compares the hour first, then the minute within the hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for ClockTime {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| ClockParseError::BadTime(s.to_string()))?;
        let hour: u8 = h
            .trim()
            .parse()
            .map_err(|_| ClockParseError::BadTime(s.to_string()))?;
        let minute: u8 = m
            .trim()
            .parse()
            .map_err(|_| ClockParseError::BadTime(s.to_string()))?;
        if hour > 23 {
            return Err(ClockParseError::HourOutOfRange(s.to_string()));
        }
        if minute > 59 {
            return Err(ClockParseError::MinuteOutOfRange(s.to_string()));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Start and end of a lesson on the same calendar day. Text form is `"HH:MM - HH:MM"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, now: ClockTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// True only once `now` is strictly past the end.
    pub fn ended_before(&self, now: ClockTime) -> bool {
        self.end < now
    }
}

impl FromStr for TimeRange {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ClockParseError::BadRange(s.to_string()))?;
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ClockParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeRange> for String {
    fn from(value: TimeRange) -> Self {
        value.to_string()
    }
}
