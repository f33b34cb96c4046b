//! Source of "today" for itinerary and date-picker highlighting.

use crate::CalendarDate;

/// Supplies the current calendar date.
///
/// `None` means the clock reads a date outside years 1..=9999; callers then
/// treat no day as today.
pub trait Clock {
    fn today(&self) -> Option<CalendarDate>;
}

/// Reads the local wall clock through chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Option<CalendarDate> {
        let now = chrono::Local::now().date_naive();
        match CalendarDate::try_from(now) {
            Ok(date) => Some(date),
            Err(error) => {
                tracing::warn!(%error, %now, "system date outside supported calendar");
                None
            },
        }
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> Option<CalendarDate> {
        Some(self.0)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Option<CalendarDate> {
        (**self).today()
    }
}
