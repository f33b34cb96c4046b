//! Trip status badges and the trip record's date pair.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, Clock, DateRange, Itinerary, Locale, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planning,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

/// Colour family for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Blue,
    Green,
    Orange,
    Gray,
    Red,
}

impl TripStatus {
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Confirmed,
        Self::Ongoing,
        Self::Completed,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Confirmed => "confirmed",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub const fn tone(self) -> BadgeTone {
        match self {
            Self::Planning => BadgeTone::Blue,
            Self::Confirmed => BadgeTone::Green,
            Self::Ongoing => BadgeTone::Orange,
            Self::Completed => BadgeTone::Gray,
            Self::Cancelled => BadgeTone::Red,
        }
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Spanish, Self::Planning) => "Planificando",
            (Locale::Spanish, Self::Confirmed) => "Confirmado",
            (Locale::Spanish, Self::Ongoing) => "En curso",
            (Locale::Spanish, Self::Completed) => "Completado",
            (Locale::Spanish, Self::Cancelled) => "Cancelado",
            (Locale::English, Self::Planning) => "Planning",
            (Locale::English, Self::Confirmed) => "Confirmed",
            (Locale::English, Self::Ongoing) => "Ongoing",
            (Locale::English, Self::Completed) => "Completed",
            (Locale::English, Self::Cancelled) => "Cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseError::InvalidFormat(format!("unknown trip status: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TripDateError {
    #[error("start date is required")]
    MissingStart,

    #[error("end date is required")]
    MissingEnd,

    #[error(transparent)]
    Invalid(#[from] ParseError),

    #[error("end date ({end}) must be after start date ({start})")]
    EndNotAfterStart { start: CalendarDate, end: CalendarDate },
}

/// The `start_date` / `end_date` columns of a trip record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TripDates {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date:   Option<String>,
}

impl TripDates {
    pub fn new(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        Self {
            start_date: start_date.map(str::to_owned),
            end_date:   end_date.map(str::to_owned),
        }
    }

    fn parsed(&self) -> Option<(CalendarDate, CalendarDate)> {
        let start = self.start_date.as_deref()?.parse().ok()?;
        let end = self.end_date.as_deref()?.parse().ok()?;
        Some((start, end))
    }

    /// Both dates present, readable and in order
    pub fn range(&self) -> Option<DateRange> {
        let (start, end) = self.parsed()?;
        DateRange::new(start, end).ok()
    }

    /// Whole days between the two dates, ignoring their order. A trip from
    /// the 1st to the 3rd lasts 2 days by this measure.
    pub fn duration_days(&self) -> Option<i64> {
        let (start, end) = self.parsed()?;
        Some(start.days_until(&end).abs())
    }

    /// "2 días", empty when a date is missing
    pub fn duration_label(&self, locale: Locale) -> String {
        self.duration_days()
            .map(|days| locale.duration(days))
            .unwrap_or_default()
    }

    /// "1 may - 3 may", empty when a date is missing
    pub fn range_label(&self, locale: Locale) -> String {
        self.parsed()
            .map(|(start, end)| format!("{} - {}", locale.day_month(&start), locale.day_month(&end)))
            .unwrap_or_default()
    }

    /// Rules applied when a trip is created: both dates required, and the
    /// trip must end on a later day than it starts.
    ///
    /// # Errors
    /// Returns the first `TripDateError` that applies.
    pub fn validate(&self) -> Result<DateRange, TripDateError> {
        let start = self
            .start_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(TripDateError::MissingStart)?;
        let end = self
            .end_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(TripDateError::MissingEnd)?;
        let start: CalendarDate = start.parse()?;
        let end: CalendarDate = end.parse()?;
        if start >= end {
            return Err(TripDateError::EndNotAfterStart { start, end });
        }
        DateRange::new(start, end).map_err(|_| TripDateError::EndNotAfterStart { start, end })
    }

    pub fn itinerary(&self, clock: &impl Clock, locale: Locale) -> Itinerary {
        Itinerary::from_bounds(self.start_date.as_deref(), self.end_date.as_deref(), clock, locale)
    }
}
