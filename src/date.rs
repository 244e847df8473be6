use crate::consts::{DATE_SEPARATOR, MAX_MONTH, MAX_YEAR};
use crate::prelude::*;
use crate::types::{Day, Month, Year};
use std::str::FromStr;

/// A calendar date named by a proclamation, with every component known.
///
/// Field order is year, month, day so the derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct ProclaimedDate {
    year: Year,
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}{}", "in_year(year)")]
    InvalidDay { month: u8, day: u8, year: Option<u16> },
}

impl std::error::Error for DateError {}

fn in_year(year: &Option<u16>) -> String {
    year.map(|y| format!(" of {y:04}")).unwrap_or_default()
}

impl ProclaimedDate {
    /// Creates a date from raw components, validating each of them.
    ///
    /// # Errors
    /// Returns the `DateError` of the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// Returns (year, month, day) as plain integers
    pub const fn to_ymd(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

impl FromStr for ProclaimedDate {
    type Err = DateError;

    /// Parses the ISO `YYYY-MM-DD` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(trimmed.to_owned()));
        };
        let number = |part: &str| {
            part.parse::<u16>()
                .map_err(|_| DateError::InvalidFormat(trimmed.to_owned()))
        };
        let narrow = |value: u16| {
            u8::try_from(value).map_err(|_| DateError::InvalidFormat(trimmed.to_owned()))
        };
        Self::new(
            number(*year)?,
            narrow(number(*month)?)?,
            narrow(number(*day)?)?,
        )
    }
}

impl serde::Serialize for ProclaimedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ProclaimedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A date as written in a single clause. The year is `None` when the clause
/// left it out and it must be taken from a later sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartialDate {
    year: Option<Year>,
    month: Month,
    day: Day,
}

impl PartialDate {
    /// Builds a clause date. With a year the day is checked against that
    /// year; without one, against the longest form of the month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the day cannot occur in the month.
    pub fn new(year: Option<Year>, month: Month, day: u8) -> Result<Self, DateError> {
        let day = match year {
            Some(year) => Day::new(day, year, month)?,
            None => Day::within(day, month)?,
        };
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Option<Year> {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// The resolved date, if the clause carried a year
    pub fn resolved(&self) -> Option<ProclaimedDate> {
        let year = self.year?;
        Some(ProclaimedDate {
            year,
            month: self.month,
            day: self.day,
        })
    }

    /// Stamps `year` onto the month and day, re-checking the day against it.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` for 29 February in a common year.
    pub fn with_year(&self, year: Year) -> Result<ProclaimedDate, DateError> {
        let day = Day::new(self.day.get(), year, self.month)?;
        Ok(ProclaimedDate {
            year,
            month: self.month,
            day,
        })
    }
}

/// Whether a date is being made a bank holiday or is losing that status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Polarity {
    #[default]
    Granted,
    /// Introduced by "in place of" and its variants
    Revoked,
}

/// A yearless date waiting for a dated sibling in the same list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDate {
    pub polarity: Polarity,
    pub date: PartialDate,
}

impl PendingDate {
    pub fn stamp(&self, year: Year) -> Result<ProclaimedDate, DateError> {
        self.date.with_year(year)
    }
}
