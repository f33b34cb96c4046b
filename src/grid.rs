//! Six-week month grids for date pickers.
//!
//! A grid always has [`GRID_CELLS`] cells: the tail of the previous month,
//! every day of the displayed month, then the head of the following month.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DAYS_PER_WEEK, GRID_CELLS, Locale, Month, Weekday, Year};

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sunday,
            Self::Monday => Weekday::Monday,
        }
    }

    /// Column a weekday lands in
    pub const fn column_of(self, weekday: Weekday) -> usize {
        (weekday.index() + DAYS_PER_WEEK - self.weekday().index()) % DAYS_PER_WEEK
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        })
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            _ => Err(format!("unknown week start '{s}' (expected sunday or monday)")),
        }
    }
}

/// One cell of a month grid.
///
/// Padding cells of January 0001 and December 9999 fall outside the years a
/// [`CalendarDate`] covers, so cells carry a chrono date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDay {
    pub date:               NaiveDate,
    pub day_of_month:       u8,
    pub in_displayed_month: bool,
}

impl CalendarDay {
    fn new(date: NaiveDate, in_displayed_month: bool) -> Self {
        Self {
            date,
            day_of_month: u8::try_from(date.day()).unwrap_or_default(),
            in_displayed_month,
        }
    }

    /// The cell's date, `None` for padding outside years 1..=9999
    pub fn calendar_date(&self) -> Option<CalendarDate> {
        CalendarDate::try_from(self.date).ok()
    }

    /// Whether this cell shows `date`
    pub fn is(&self, date: &CalendarDate) -> bool {
        self.date == date.naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MonthGrid {
    year:       Year,
    month:      Month,
    week_start: WeekStart,
    cells:      Vec<CalendarDay>,
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

impl MonthGrid {
    /// Builds the grid for the month containing `reference`. The day of
    /// `reference` is ignored.
    pub fn build(reference: CalendarDate, week_start: WeekStart) -> Self {
        let year = reference.year();
        let month = reference.month();
        let first = reference.first_of_month().naive();
        let leading = week_start.column_of(first.weekday().into());
        let grid_start = add_days(first, -i64::try_from(leading).unwrap_or_default());

        let cells = grid_start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| {
                let in_month = date.month() == u32::from(month.get()) && date.year() == i32::from(year.get());
                CalendarDay::new(date, in_month)
            })
            .collect();

        Self {
            year,
            month,
            week_start,
            cells,
        }
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// All cells, row by row
    pub fn cells(&self) -> &[CalendarDay] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CalendarDay> {
        self.cells.iter()
    }

    /// Rows of seven cells
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarDay> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// The displayed month's days only, in order
    pub fn month_days(&self) -> impl Iterator<Item = &CalendarDay> + '_ {
        self.cells.iter().filter(|cell| cell.in_displayed_month)
    }

    /// Short column labels in grid order
    pub fn weekday_headers(&self, locale: Locale) -> [&'static str; DAYS_PER_WEEK] {
        let start = self.week_start.weekday().index();
        std::array::from_fn(|column| locale.weekday_short(Weekday::from_index(start + column)))
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarDay;
    type IntoIter = std::slice::Iter<'a, CalendarDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sunday-first grid for the month containing `reference`.
pub fn build_month_grid(reference: CalendarDate) -> MonthGrid {
    MonthGrid::build(reference, WeekStart::Sunday)
}
