//! Day-by-day itinerary sections for a trip.
//!
//! Each section is keyed by its ISO date so that per-day UI state (collapsed
//! or expanded) follows the date, not the position in the list.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{CalendarDate, Clock, DateRange, Locale, locale::capitalize};

/// One day of a trip, with its display labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItineraryDay {
    pub date:         CalendarDate,
    /// `YYYY-MM-DD`, unique within an itinerary
    pub iso_key:      String,
    /// Capitalized, e.g. "Miércoles"
    pub weekday_name: String,
    pub day_of_month: u8,
    /// As the locale writes it mid-sentence, e.g. "mayo"
    pub month_name:   String,
    pub is_today:     bool,
}

impl ItineraryDay {
    pub fn new(date: CalendarDate, today: Option<CalendarDate>, locale: Locale) -> Self {
        Self {
            date,
            iso_key: date.iso_key(),
            weekday_name: capitalize(locale.weekday_name(date.weekday())),
            day_of_month: date.day().get(),
            month_name: locale.month_name(date.month()).to_owned(),
            is_today: today == Some(date),
        }
    }

    /// Section heading: "Miércoles 1 de mayo"
    pub fn heading(&self, locale: Locale) -> String {
        locale.day_heading(&self.date)
    }

    /// Three-letter uppercase month for the date badge: "MAY"
    pub fn month_abbrev(&self) -> String {
        self.month_name.chars().take(3).flat_map(char::to_uppercase).collect()
    }
}

/// The ordered days of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Itinerary {
    locale: Locale,
    days:   Vec<ItineraryDay>,
}

impl Itinerary {
    /// Builds one entry per day of `range`, ascending.
    pub fn build(range: &DateRange, today: Option<CalendarDate>, locale: Locale) -> Self {
        let days = range
            .days()
            .map(|date| ItineraryDay::new(date, today, locale))
            .collect();
        Self { locale, days }
    }

    /// Itinerary for a trip's stored date strings.
    ///
    /// Produces an empty itinerary when either date is missing or does not
    /// parse, or when the start falls after the end.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>, clock: &impl Clock, locale: Locale) -> Self {
        let empty = Self {
            locale,
            days: Vec::new(),
        };
        let (Some(start), Some(end)) = (start, end) else {
            return empty;
        };

        let (start, end) = match (start.parse::<CalendarDate>(), end.parse::<CalendarDate>()) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(error), _) | (_, Err(error)) => {
                warn!(%error, start, end, "unreadable trip dates; showing empty itinerary");
                return empty;
            },
        };

        match DateRange::new(start, end) {
            Ok(range) => Self::build(&range, clock.today(), locale),
            Err(error) => {
                debug!(%error, "trip ends before it starts; showing empty itinerary");
                empty
            },
        }
    }

    pub fn days(&self) -> &[ItineraryDay] {
        &self.days
    }

    pub fn into_days(self) -> Vec<ItineraryDay> {
        self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItineraryDay> {
        self.days.iter()
    }

    pub fn find(&self, iso_key: &str) -> Option<&ItineraryDay> {
        self.days.iter().find(|day| day.iso_key == iso_key)
    }

    /// "Día 2 de 5" for the entry at zero-based `index`
    pub fn position_label(&self, index: usize) -> String {
        self.locale.day_position(index + 1, self.days.len())
    }
}

impl<'a> IntoIterator for &'a Itinerary {
    type Item = &'a ItineraryDay;
    type IntoIter = std::slice::Iter<'a, ItineraryDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Days from `start` to `end` inclusive; empty if either is missing,
/// unreadable, or out of order.
pub fn enumerate_trip_days(
    start: Option<&str>,
    end: Option<&str>,
    clock: &impl Clock,
    locale: Locale,
) -> Vec<ItineraryDay> {
    Itinerary::from_bounds(start, end, clock, locale).into_days()
}

/// Collapsed itinerary sections, keyed by ISO date. Absent means expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CollapsedDays(BTreeSet<String>);

impl CollapsedDays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a day's state; returns `true` if it is now collapsed.
    pub fn toggle(&mut self, iso_key: &str) -> bool {
        if self.0.remove(iso_key) {
            false
        } else {
            self.0.insert(iso_key.to_owned());
            true
        }
    }

    pub fn collapse(&mut self, iso_key: &str) {
        self.0.insert(iso_key.to_owned());
    }

    pub fn expand(&mut self, iso_key: &str) {
        self.0.remove(iso_key);
    }

    pub fn is_collapsed(&self, iso_key: &str) -> bool {
        self.0.contains(iso_key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, test_utils::date};

    fn keys(days: &[ItineraryDay]) -> Vec<&str> {
        days.iter().map(|day| day.iso_key.as_str()).collect()
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 5, 2))
    }

    #[test]
    fn test_missing_bounds_give_empty() {
        let clock = clock();
        assert!(enumerate_trip_days(None, None, &clock, Locale::Spanish).is_empty());
        assert!(enumerate_trip_days(Some("2024-05-01"), None, &clock, Locale::Spanish).is_empty());
        assert!(enumerate_trip_days(None, Some("2024-05-01"), &clock, Locale::Spanish).is_empty());
    }

    #[test]
    fn test_single_day() {
        let days = enumerate_trip_days(Some("2024-05-01"), Some("2024-05-01"), &clock(), Locale::Spanish);
        assert_eq!(keys(&days), vec!["2024-05-01"]);
    }

    #[test]
    fn test_three_days_in_order() {
        let days = enumerate_trip_days(Some("2024-05-01"), Some("2024-05-03"), &clock(), Locale::Spanish);
        assert_eq!(keys(&days), vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let days = enumerate_trip_days(Some("2024-05-03"), Some("2024-05-01"), &clock(), Locale::Spanish);
        assert!(days.is_empty());
    }

    #[test]
    fn test_unreadable_dates_are_empty() {
        let days = enumerate_trip_days(Some("next tuesday"), Some("2024-05-01"), &clock(), Locale::Spanish);
        assert!(days.is_empty());
        let days = enumerate_trip_days(Some("2024-05-01"), Some("2024-02-30"), &clock(), Locale::Spanish);
        assert!(days.is_empty());
    }

    #[test]
    fn test_month_boundary() {
        let days = enumerate_trip_days(Some("2024-01-30"), Some("2024-02-02"), &clock(), Locale::Spanish);
        assert_eq!(keys(&days), vec!["2024-01-30", "2024-01-31", "2024-02-01", "2024-02-02"]);
        assert_eq!(days[1].month_name, "enero");
        assert_eq!(days[2].month_name, "febrero");
        assert_eq!(days[2].day_of_month, 1);
    }

    #[test]
    fn test_exactly_one_today() {
        let days = enumerate_trip_days(Some("2024-04-28"), Some("2024-05-05"), &clock(), Locale::Spanish);
        let today: Vec<_> = days.iter().filter(|day| day.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].iso_key, "2024-05-02");
    }

    #[test]
    fn test_no_today_outside_range() {
        let days = enumerate_trip_days(Some("2024-06-01"), Some("2024-06-03"), &clock(), Locale::Spanish);
        assert!(days.iter().all(|day| !day.is_today));
    }

    #[test]
    fn test_today_follows_the_clock() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 3)).unwrap();
        let before = Itinerary::build(&range, Some(date(2024, 5, 1)), Locale::Spanish);
        let after = Itinerary::build(&range, Some(date(2024, 5, 3)), Locale::Spanish);
        assert!(before.days()[0].is_today);
        assert!(after.days()[2].is_today);
        assert!(!after.days()[0].is_today);
    }

    #[test]
    fn test_labels() {
        let days = enumerate_trip_days(Some("2024-05-01"), Some("2024-05-01"), &clock(), Locale::Spanish);
        let day = &days[0];
        assert_eq!(day.weekday_name, "Miércoles");
        assert_eq!(day.month_name, "mayo");
        assert_eq!(day.heading(Locale::Spanish), "Miércoles 1 de mayo");
        assert_eq!(day.month_abbrev(), "MAY");

        let days = enumerate_trip_days(Some("2024-09-01"), Some("2024-09-01"), &clock(), Locale::English);
        assert_eq!(days[0].weekday_name, "Sunday");
        assert_eq!(days[0].month_abbrev(), "SEP");
    }

    #[test]
    fn test_position_label() {
        let itinerary = Itinerary::from_bounds(Some("2024-05-01"), Some("2024-05-03"), &clock(), Locale::Spanish);
        assert_eq!(itinerary.len(), 3);
        assert_eq!(itinerary.position_label(0), "Día 1 de 3");
        assert_eq!(itinerary.position_label(2), "Día 3 de 3");
        assert!(itinerary.find("2024-05-02").is_some());
        assert!(itinerary.find("2024-05-04").is_none());
    }

    #[test]
    fn test_keys_depend_only_on_date() {
        let short = enumerate_trip_days(Some("2024-05-02"), Some("2024-05-03"), &clock(), Locale::Spanish);
        let long = enumerate_trip_days(Some("2024-04-30"), Some("2024-05-03"), &clock(), Locale::English);
        assert_eq!(short[0].iso_key, long[2].iso_key);
    }

    #[test]
    fn test_collapsed_days_toggle() {
        let mut collapsed = CollapsedDays::new();
        assert!(!collapsed.is_collapsed("2024-05-01"));
        assert!(collapsed.toggle("2024-05-01"));
        assert!(collapsed.is_collapsed("2024-05-01"));
        assert!(!collapsed.toggle("2024-05-01"));
        assert!(collapsed.is_empty());

        collapsed.collapse("2024-05-02");
        collapsed.collapse("2024-05-02");
        assert_eq!(collapsed.len(), 1);
        collapsed.expand("2024-05-02");
        collapsed.expand("2024-05-02");
        assert!(collapsed.is_empty());
    }

    #[test]
    fn test_collapsed_state_survives_range_change() {
        let mut collapsed = CollapsedDays::new();
        let before = enumerate_trip_days(Some("2024-05-01"), Some("2024-05-03"), &clock(), Locale::Spanish);
        collapsed.toggle(&before[1].iso_key);

        // Trip gains a day at the front; 2024-05-02 is now at index 2
        let after = enumerate_trip_days(Some("2024-04-30"), Some("2024-05-03"), &clock(), Locale::Spanish);
        let states: Vec<bool> = after.iter().map(|day| collapsed.is_collapsed(&day.iso_key)).collect();
        assert_eq!(states, vec![false, false, true, false]);
    }
}
