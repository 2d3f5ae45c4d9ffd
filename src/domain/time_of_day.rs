use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::TimeOfDayError;

// Slot granularity in minutes.
pub const SLOT_MINUTES: u16 = 15;

// Last bookable slot of the day (23:45), in minutes since midnight.
pub const LAST_SLOT_MINUTES: u16 = 23 * 60 + 45;

/// A quarter-hour aligned wall-clock time, written as `"HH.MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeOfDayError> {
        if hour > 23 {
            return Err(TimeOfDayError::HourOutOfRange(hour));
        }
        if !matches!(minute, 0 | 15 | 30 | 45) {
            return Err(TimeOfDayError::MinuteNotQuarter(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Builds a slot from minutes since midnight. Returns `None` past 23:45
    /// or off the quarter-hour grid.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes > LAST_SLOT_MINUTES || minutes % SLOT_MINUTES != 0 {
            return None;
        }
        Some(Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // Both fields are range-checked on construction.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeOfDayError::Malformed(s.to_string());
        let (hour, minute) = s.trim().split_once('.').ok_or_else(malformed)?;

        // Require the zero-padded two-digit form on both sides.
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(malformed());
        }

        let hour = hour.parse::<u8>().map_err(|_| malformed())?;
        let minute = minute.parse::<u8>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
