//! Day and month naming for the languages the planner ships in.
//!
//! Spanish is the default. Names are lowercase as a locale formatter would
//! produce them; headings that need a leading capital go through
//! [`capitalize`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DAYS_PER_WEEK, Month, Weekday, Year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

const ES_WEEKDAYS: [&str; DAYS_PER_WEEK] = ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"];
const ES_WEEKDAYS_SHORT: [&str; DAYS_PER_WEEK] = ["Do", "Lu", "Ma", "Mi", "Ju", "Vi", "Sa"];
const ES_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];
const ES_MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const EN_WEEKDAYS: [&str; DAYS_PER_WEEK] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const EN_WEEKDAYS_SHORT: [&str; DAYS_PER_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// BCP 47 language tag
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }

    pub const fn weekday_name(self, weekday: Weekday) -> &'static str {
        match self {
            Self::Spanish => ES_WEEKDAYS[weekday.index()],
            Self::English => EN_WEEKDAYS[weekday.index()],
        }
    }

    /// Two-letter column header for a date-picker grid
    pub const fn weekday_short(self, weekday: Weekday) -> &'static str {
        match self {
            Self::Spanish => ES_WEEKDAYS_SHORT[weekday.index()],
            Self::English => EN_WEEKDAYS_SHORT[weekday.index()],
        }
    }

    pub const fn month_name(self, month: Month) -> &'static str {
        match self {
            Self::Spanish => ES_MONTHS[month.index()],
            Self::English => EN_MONTHS[month.index()],
        }
    }

    pub const fn month_short(self, month: Month) -> &'static str {
        match self {
            Self::Spanish => ES_MONTHS_SHORT[month.index()],
            Self::English => EN_MONTHS_SHORT[month.index()],
        }
    }

    /// "martes, 30 de abril de 2024" / "Tuesday, April 30, 2024"
    pub fn long_date(self, date: &CalendarDate) -> String {
        let weekday = self.weekday_name(date.weekday());
        let month = self.month_name(date.month());
        match self {
            Self::Spanish => format!("{weekday}, {} de {month} de {}", date.day(), date.year()),
            Self::English => format!("{weekday}, {month} {}, {}", date.day(), date.year()),
        }
    }

    /// "5 may" / "May 5", used on trip cards
    pub fn day_month(self, date: &CalendarDate) -> String {
        let month = self.month_short(date.month());
        match self {
            Self::Spanish => format!("{} {month}", date.day()),
            Self::English => format!("{month} {}", date.day()),
        }
    }

    /// Date-picker title: "mayo de 2024" / "May 2024"
    pub fn month_year(self, month: Month, year: Year) -> String {
        let name = self.month_name(month);
        match self {
            Self::Spanish => format!("{name} de {year}"),
            Self::English => format!("{name} {year}"),
        }
    }

    /// Itinerary day heading: "Martes 30 de abril" / "Tuesday, April 30"
    pub fn day_heading(self, date: &CalendarDate) -> String {
        let weekday = capitalize(self.weekday_name(date.weekday()));
        let month = self.month_name(date.month());
        match self {
            Self::Spanish => format!("{weekday} {} de {month}", date.day()),
            Self::English => format!("{weekday}, {month} {}", date.day()),
        }
    }

    pub fn duration(self, days: i64) -> String {
        match (self, days) {
            (Self::Spanish, 1) => "1 día".to_owned(),
            (Self::Spanish, n) => format!("{n} días"),
            (Self::English, 1) => "1 day".to_owned(),
            (Self::English, n) => format!("{n} days"),
        }
    }

    /// 1-based position label: "Día 2 de 5" / "Day 2 of 5"
    pub fn day_position(self, position: usize, total: usize) -> String {
        match self {
            Self::Spanish => format!("Día {position} de {total}"),
            Self::English => format!("Day {position} of {total}"),
        }
    }

    pub const fn today_badge(self) -> &'static str {
        match self {
            Self::Spanish => "Hoy",
            Self::English => "Today",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        // Region subtags (es-ES, en-GB) select the base language
        match tag.split(['-', '_']).next() {
            Some("es") => Ok(Self::Spanish),
            Some("en") => Ok(Self::English),
            _ => Err(format!("unsupported locale '{s}' (expected es or en)")),
        }
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
