mod consts;
mod range;
mod types;

pub mod cli;
pub mod clock;
pub mod config;
pub mod grid;
pub mod itinerary;
pub mod locale;
pub mod picker;
pub mod trip;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CalendarConfig, ConfigError};
pub use consts::*;
pub use grid::{CalendarDay, MonthGrid, WeekStart, build_month_grid};
pub use itinerary::{CollapsedDays, Itinerary, ItineraryDay, enumerate_trip_days};
pub use locale::Locale;
pub use picker::{CellState, DateConstraints, DatePicker, PickError};
pub use range::{CalendarError, DateRange, Days};
pub use trip::{BadgeTone, TripDateError, TripDates, TripStatus};
pub use types::{Day, Month, Weekday, Year};

use chrono::{Datelike, NaiveDate};
use derive_more::Display;
use std::str::FromStr;

/// A calendar date with no time-of-day component.
///
/// Field order gives chronological ordering through the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Builds a date from already validated parts.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        // Day is only range-checked against a month when built with Day::new
        let day = Day::new(day.get(), year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    /// Builds a date from raw numbers.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first component out of range.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    /// First day of `month` in `year`
    pub fn first_of(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: Day::FIRST,
        }
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

    /// First day of this date's month
    pub fn first_of_month(&self) -> Self {
        Self::first_of(self.year, self.month)
    }

    /// The same day as a chrono date
    pub fn naive(&self) -> NaiveDate {
        // Years 1..=9999 with a checked day are always representable
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )
        .unwrap_or_default()
    }

    /// Signed whole days from `self` to `other`
    pub fn days_until(&self, other: &Self) -> i64 {
        other.naive().signed_duration_since(self.naive()).num_days()
    }

    pub fn weekday(&self) -> Weekday {
        self.naive().weekday().into()
    }

    /// The following day, or `None` past 9999-12-31
    pub fn succ(&self) -> Option<Self> {
        self.naive().succ_opt().and_then(|next| Self::try_from(next).ok())
    }

    /// The preceding day, or `None` before 0001-01-01
    pub fn pred(&self) -> Option<Self> {
        self.naive().pred_opt().and_then(|prev| Self::try_from(prev).ok())
    }

    /// ISO `YYYY-MM-DD` form; stable across calls for the same date
    pub fn iso_key(&self) -> String {
        self.to_string()
    }

    /// Parses a fixed-width run of ASCII digits, so `+5` or `02024` are rejected.
    fn parse_digits<T: FromStr>(s: &str, width: usize) -> Result<T, ParseError> {
        if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(format!("expected {width} digits, found '{s}'")));
        }
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

// --- month stepping ---
pub(crate) const fn next_month(year: u16, month: u8) -> Option<(u16, u8)> {
    debug_assert!(month != 0 && month <= MAX_MONTH);
    if month == DECEMBER {
        if year >= MAX_YEAR {
            None
        } else {
            Some((year + 1, JANUARY))
        }
    } else {
        Some((year, month + 1))
    }
}

pub(crate) const fn prev_month(year: u16, month: u8) -> Option<(u16, u8)> {
    debug_assert!(month != 0 && month <= MAX_MONTH);
    if month == JANUARY {
        if year <= 1 {
            None
        } else {
            Some((year - 1, DECEMBER))
        }
    } else {
        Some((year, month - 1))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD`. A trailing `T...` time component is ignored,
    /// so timestamps coming back from the trip store still resolve to their date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let date_part = trimmed
            .split_once(TIME_SEPARATOR)
            .map_or(trimmed, |(date, _time)| date);

        let parts: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
        let [y, m, d] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY-MM-DD, found {} {} separators in {trimmed}",
                parts.len().saturating_sub(1),
                DATE_SEPARATOR
            )));
        };

        let year = Self::parse_digits::<u16>(y, 4)?;
        let month = Self::parse_digits::<u8>(m, 2)?;
        let day = Self::parse_digits::<u8>(d, 2)?;
        Self::from_ymd(year, month, day)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
        // chrono guarantees month 1..=12 and day 1..=31
        let month = u8::try_from(value.month()).map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
        let day = u8::try_from(value.day()).map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
        Self::from_ymd(year, month, day)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(value: CalendarDate) -> Self {
        value.naive()
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
