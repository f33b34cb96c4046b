//! Selection rules for a month-grid date picker.

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, CalendarDay, CalendarError, Locale, Month, MonthGrid, WeekStart, Year, next_month, prev_month,
};

/// Inclusive bounds on selectable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateConstraints {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl DateConstraints {
    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    /// Only `date` and later
    pub const fn starting_at(date: CalendarDate) -> Self {
        Self {
            min: Some(date),
            max: None,
        }
    }

    pub fn allows(&self, date: &CalendarDate) -> bool {
        self.min.is_none_or(|min| *date >= min) && self.max.is_none_or(|max| *date <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    #[error("{0} is outside the selectable range")]
    Disabled(CalendarDate),

    #[error("date picker is disabled")]
    PickerDisabled,

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// How a grid cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    /// Belongs to an adjacent month
    pub muted:    bool,
    pub disabled: bool,
    pub selected: bool,
    pub today:    bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    year:        Year,
    month:       Month,
    week_start:  WeekStart,
    selected:    Option<CalendarDate>,
    constraints: DateConstraints,
    disabled:    bool,
}

impl DatePicker {
    /// Opens on the month of `value`, or of `today` when nothing is selected.
    pub const fn new(value: Option<CalendarDate>, today: CalendarDate, week_start: WeekStart) -> Self {
        let shown = match value {
            Some(date) => date,
            None => today,
        };
        Self {
            year: shown.year(),
            month: shown.month(),
            week_start,
            selected: value,
            constraints: DateConstraints::unbounded(),
            disabled: false,
        }
    }

    #[must_use]
    pub const fn with_constraints(mut self, constraints: DateConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub const fn selected(&self) -> Option<CalendarDate> {
        self.selected
    }

    pub const fn visible_month(&self) -> (Year, Month) {
        (self.year, self.month)
    }

    pub const fn constraints(&self) -> DateConstraints {
        self.constraints
    }

    pub fn is_date_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled || !self.constraints.allows(date)
    }

    /// # Errors
    /// Returns `PickError` if the picker or the date is disabled; the
    /// selection is left unchanged.
    pub fn select(&mut self, date: CalendarDate) -> Result<(), PickError> {
        if self.disabled {
            return Err(PickError::PickerDisabled);
        }
        if !self.constraints.allows(&date) {
            return Err(PickError::Disabled(date));
        }
        self.selected = Some(date);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` before January 0001.
    pub fn show_previous_month(&mut self) -> Result<(), CalendarError> {
        let (y, m) = prev_month(self.year.get(), self.month.get()).ok_or(CalendarError::OutOfRange {
            year:  self.year.get(),
            month: self.month.get(),
        })?;
        self.year = Year::new(y)?;
        self.month = Month::new(m)?;
        Ok(())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` after December 9999.
    pub fn show_next_month(&mut self) -> Result<(), CalendarError> {
        let (y, m) = next_month(self.year.get(), self.month.get()).ok_or(CalendarError::OutOfRange {
            year:  self.year.get(),
            month: self.month.get(),
        })?;
        self.year = Year::new(y)?;
        self.month = Month::new(m)?;
        Ok(())
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(CalendarDate::first_of(self.year, self.month), self.week_start)
    }

    /// Padding cells outside years 1..=9999 are always disabled.
    pub fn cell_state(&self, cell: &CalendarDay, today: Option<CalendarDate>) -> CellState {
        CellState {
            muted:    !cell.in_displayed_month,
            disabled: cell
                .calendar_date()
                .is_none_or(|date| self.is_date_disabled(&date)),
            selected: self.selected.is_some_and(|date| cell.is(&date)),
            today:    today.is_some_and(|date| cell.is(&date)),
        }
    }

    pub fn title(&self, locale: Locale) -> String {
        locale.month_year(self.month, self.year)
    }

    /// Long form of the selection, empty when nothing is selected
    pub fn display_value(&self, locale: Locale) -> String {
        self.selected
            .map(|date| locale.long_date(&date))
            .unwrap_or_default()
    }
}
