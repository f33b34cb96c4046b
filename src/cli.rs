//! `tripcal`: print month grids, itineraries and trip summaries.

use std::{
    ffi::OsString,
    fmt::{self, Write as _},
    fs,
    io::IsTerminal,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    CalendarConfig, CalendarDate, Clock, Itinerary, Locale, MonthGrid, SystemClock, TripDates, TripStatus,
    WeekStart,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "tripcal", version, about = "Trip calendar: month grids and itineraries")]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// TOML file with `locale` and `week_start`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[arg(long = "week-start", global = true)]
    pub week_start: Option<WeekStart>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the six-week grid for a month (defaults to the current one)
    Month { date: Option<CalendarDate> },
    /// List the days between two dates, inclusive
    Itinerary { start: String, end: String },
    /// Summarize a trip record stored as JSON
    Trip { file: PathBuf },
}

/// The fields of a stored trip this tool reads.
#[derive(Debug, Deserialize)]
struct TripRecord {
    title:       String,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    status:      TripStatus,
    #[serde(flatten)]
    dates:       TripDates,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = Cli::parse_from(raw_args);
    init_tracing(cli.verbose, cli.quiet)?;

    let config = match cli.config.as_deref() {
        Some(path) => CalendarConfig::load(path)?,
        None => CalendarConfig::default(),
    }
    .with_overrides(cli.locale, cli.week_start);
    debug!(?config, "effective calendar config");

    let clock = SystemClock;
    let output = match cli.command {
        Command::Month { date } => {
            let reference = match date {
                Some(date) => date,
                None => clock.today().context("system clock is outside the supported calendar")?,
            };
            render_month(&MonthGrid::build(reference, config.week_start), clock.today(), config.locale)?
        },
        Command::Itinerary { start, end } => {
            let itinerary = Itinerary::from_bounds(Some(start.as_str()), Some(end.as_str()), &clock, config.locale);
            render_itinerary(&itinerary, config.locale)?
        },
        Command::Trip { file } => render_trip(&file, &clock, config.locale)?,
    };

    print!("{output}");
    info!("done");
    Ok(())
}

fn render_month(grid: &MonthGrid, today: Option<CalendarDate>, locale: Locale) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let title = crate::locale::capitalize(&locale.month_year(grid.month(), grid.year()));
    writeln!(out, "{title:^28}")?;
    for header in grid.weekday_headers(locale) {
        write!(out, " {header:>2} ")?;
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let (open, close) = if today.is_some_and(|date| cell.is(&date)) {
                ('[', ']')
            } else if cell.in_displayed_month {
                (' ', ' ')
            } else {
                ('(', ')')
            };
            write!(out, "{open}{:>2}{close}", cell.day_of_month)?;
        }
        out.push('\n');
    }
    Ok(out)
}

fn render_itinerary(itinerary: &Itinerary, locale: Locale) -> Result<String, fmt::Error> {
    if itinerary.is_empty() {
        let message = match locale {
            Locale::Spanish => "Añade fechas de inicio y fin para ver tu itinerario\n",
            Locale::English => "Add start and end dates to see your itinerary\n",
        };
        return Ok(message.to_owned());
    }

    let mut out = String::new();
    for (index, day) in itinerary.iter().enumerate() {
        write!(
            out,
            "{:>2} {}  {}  ({})",
            day.day_of_month,
            day.month_abbrev(),
            day.heading(locale),
            itinerary.position_label(index)
        )?;
        if day.is_today {
            write!(out, "  [{}]", locale.today_badge())?;
        }
        out.push('\n');
    }
    Ok(out)
}

fn render_trip(path: &Path, clock: &impl Clock, locale: Locale) -> anyhow::Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read trip file {}", path.display()))?;
    let trip: TripRecord =
        serde_json::from_str(&text).with_context(|| format!("failed to parse trip file {}", path.display()))?;

    let mut out = String::new();
    writeln!(out, "{} [{}]", trip.title, trip.status.label(locale))?;
    if let Some(destination) = trip.destination.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "{destination}")?;
    }
    let range = trip.dates.range_label(locale);
    if !range.is_empty() {
        writeln!(out, "{range} · {}", trip.dates.duration_label(locale))?;
    }
    out.push('\n');
    out.push_str(&render_itinerary(&trip.dates.itinerary(clock, locale), locale)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedClock, build_month_grid, test_utils::date};
    use std::io::Write;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["tripcal", "--locale", "en", "month", "2024-05-01"]);
        assert_eq!(cli.locale, Some(Locale::English));
        assert!(matches!(cli.command, Command::Month { date: Some(d) } if d == date(2024, 5, 1)));

        let cli = Cli::parse_from(["tripcal", "itinerary", "2024-05-01", "2024-05-03", "--week-start", "monday"]);
        assert_eq!(cli.week_start, Some(WeekStart::Monday));
        assert!(matches!(cli.command, Command::Itinerary { .. }));
    }

    #[test]
    fn test_cli_rejects_bad_month_date() {
        assert!(Cli::try_parse_from(["tripcal", "month", "2024-02-30"]).is_err());
    }

    #[test]
    fn test_render_month_marks_today_and_adjacent_days() {
        let grid = build_month_grid(date(2024, 5, 1));
        let text = render_month(&grid, Some(date(2024, 5, 2)), Locale::Spanish).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("Mayo de 2024"));
        assert!(lines[2].starts_with("(28)(29)(30)  1 [ 2]"));
    }

    #[test]
    fn test_render_empty_itinerary() {
        let itinerary = Itinerary::from_bounds(None, None, &FixedClock(date(2024, 5, 2)), Locale::Spanish);
        assert!(render_itinerary(&itinerary, Locale::Spanish).unwrap().starts_with("Añade fechas"));
    }

    #[test]
    fn test_render_month_at_calendar_start() {
        let grid = build_month_grid(date(1, 1, 1));
        let text = render_month(&grid, None, Locale::English).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[2].starts_with("(31)  1   2 "));
    }

    #[test]
    fn test_render_trip_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"title":"Lisboa","destination":"Lisbon, Portugal","status":"confirmed","start_date":"2024-05-01","end_date":"2024-05-03"}}"#
        )
        .unwrap();
        let text = render_trip(file.path(), &FixedClock(date(2024, 5, 2)), Locale::Spanish).unwrap();
        assert!(text.starts_with("Lisboa [Confirmado]\nLisbon, Portugal\n1 may - 3 may · 2 días\n"));
        assert!(text.contains("Miércoles 1 de mayo  (Día 1 de 3)"));
        assert!(text.contains("Jueves 2 de mayo  (Día 2 de 3)  [Hoy]"));
    }
}
