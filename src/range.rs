use std::{iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};

use derive_more::Display;

use crate::{CalendarDate, ParseError, RANGE_SEPARATOR};

/// An inclusive span of calendar days.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range and calendar grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: CalendarDate, end: CalendarDate },

    /// Month navigation would leave years 1..=9999.
    #[error("No month past {year}-{month:02} in the supported calendar")]
    OutOfRange { year: u16, month: u8 },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidRange` if start > end.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day
    pub const fn single(date: CalendarDate) -> Self {
        Self {
            start: date,
            end:   date,
        }
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Number of days covered, counting both ends
    pub fn len_days(&self) -> usize {
        usize::try_from(self.start.days_until(&self.end) + 1).unwrap_or_default()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Ascending iterator over every day in the range
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            last: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = CalendarDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

impl IntoIterator for &DateRange {
    type Item = CalendarDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Lazy day-by-day walk over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDate>,
    last: CalendarDate,
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|date| *date <= self.last)?;
        self.next = if current == self.last { None } else { current.succ() };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .filter(|date| *date <= self.last)
            .map_or(0, |date| usize::try_from(date.days_until(&self.last) + 1).unwrap_or_default());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

impl FromStr for DateRange {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(CalendarError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    CalendarError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(CalendarError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          CalendarDate,
            end:            CalendarDate,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          date(2024, 5, 1),
                end:            date(2024, 5, 3),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          date(2024, 5, 3),
                end:            date(2024, 5, 1),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          date(2024, 5, 1),
                end:            date(2024, 5, 1),
                should_succeed: true,
                description:    "equal dates (start == end)",
            },
        ];

        for case in &cases {
            let range = DateRange::new(case.start, case.end);
            assert_eq!(range.is_ok(), case.should_succeed, "{}", case.description);
        }
    }

    #[test]
    fn test_days_across_month_boundary() {
        let range = DateRange::new(date(2024, 1, 30), date(2024, 2, 2)).expect("valid range");
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 2)]
        );
        assert_eq!(range.len_days(), 4);
        assert_eq!(range.days().len(), 4);
    }

    #[test]
    fn test_days_single() {
        let range = DateRange::single(date(2024, 5, 1));
        assert_eq!(range.days().collect::<Vec<_>>(), vec![date(2024, 5, 1)]);
        assert_eq!(range.len_days(), 1);
    }

    #[test]
    fn test_days_stops_at_calendar_end() {
        let range = DateRange::new(date(9999, 12, 30), date(9999, 12, 31)).expect("valid range");
        let mut days = range.days();
        assert_eq!(days.next(), Some(date(9999, 12, 30)));
        assert_eq!(days.next(), Some(date(9999, 12, 31)));
        assert_eq!(days.next(), None);
        assert_eq!(days.next(), None);
    }

    #[test]
    fn test_days_over_leap_year() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).expect("valid range");
        assert_eq!(range.days().count(), 366);
        assert_eq!(range.len_days(), 366);
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 3)).expect("valid range");
        assert!(range.contains(&date(2024, 5, 1)));
        assert!(range.contains(&date(2024, 5, 3)));
        assert!(!range.contains(&date(2024, 4, 30)));
        assert!(!range.contains(&date(2024, 5, 4)));
    }

    #[test]
    fn test_from_str() {
        let range = "2024-05-01/2024-05-03".parse::<DateRange>().expect("parse range");
        assert_eq!(range.start(), date(2024, 5, 1));
        assert_eq!(range.end(), date(2024, 5, 3));
        assert_eq!(range.to_string(), "2024-05-01/2024-05-03");

        assert!("2024-05-03/2024-05-01".parse::<DateRange>().is_err());
        assert!("2024-05-01".parse::<DateRange>().is_err());
        assert!("2024-05-01/2024-05-02/2024-05-03".parse::<DateRange>().is_err());
        assert!(matches!(
            "2024-05-01/2024-02-30".parse::<DateRange>(),
            Err(CalendarError::ParseError(_))
        ));
    }

    #[test]
    fn test_serde() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 3)).expect("valid range");
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"2024-05-01/2024-05-03\"");
        let parsed: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, range);
    }
}
