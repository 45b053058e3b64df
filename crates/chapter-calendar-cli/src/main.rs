//! `chaptercal` CLI: month grids, month layouts and date-range labels from
//! the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the September 2025 grid as a text calendar
//! chaptercal --tz America/Chicago grid --month 2025-09
//!
//! # The same grid as JSON
//! chaptercal grid --month 2025-09 --json
//!
//! # Label an event
//! chaptercal format --start 2025-09-08T14:00:00Z --end 2025-09-08T15:30:00Z
//!
//! # Lay out a month of events exported from the store
//! chaptercal layout --month 2025-09 -i events.json -o layout.json
//!
//! # Upcoming events, with the clock pinned
//! chaptercal --now 2025-09-08T20:00:00Z upcoming -i events.json
//! ```

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chapter_calendar::civil;
use chapter_calendar::event::filter_window;
use chapter_calendar::grid::WEEKDAY_LABELS;
use chapter_calendar::upcoming::upcoming_events;
use chapter_calendar::{
    build_month_grid, format_date_range, format_instant_range, layout_month, parse_events_json,
    CalendarConfig, CalendarView, ChronoFormatter, Clock, FixedClock, FormatOptions, MonthGrid,
    SystemClock, TimeFormat, YearDisplay,
};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "chaptercal",
    version,
    about = "Chapter calendar month grids and date labels"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display timezone (IANA name); overrides the config file
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Display locale (e.g. en-US); overrides the config file
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Pin the current instant instead of reading the system clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 6x7 grid for a month
    Grid {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Emit the grid and its fetch window as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a start/end pair as a display label
    Format {
        #[arg(long, allow_hyphen_values = true)]
        start: String,
        #[arg(long, allow_hyphen_values = true)]
        end: String,
        /// Ignore times of day
        #[arg(long)]
        all_day: bool,
        /// Leave the weekday out of date parts
        #[arg(long)]
        no_weekday: bool,
        /// When to show the year
        #[arg(long, value_enum, default_value_t = YearArg::Auto)]
        year: YearArg,
        /// Location appended to the label
        #[arg(long)]
        location: Option<String>,
        /// Clock precision
        #[arg(long, value_enum, default_value_t = TimeArg::Short)]
        time_format: TimeArg,
    },
    /// Lay out a month of events (JSON rows) on its grid
    Layout {
        /// Month to lay out as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Events file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the next events starting from today
    Upcoming {
        /// Events file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Override the configured number of days to look ahead
        #[arg(long)]
        days: Option<i64>,
        /// Override the configured maximum number of events
        #[arg(long)]
        limit: Option<usize>,
        /// Emit the events as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum YearArg {
    Auto,
    Always,
    Never,
}

impl From<YearArg> for YearDisplay {
    fn from(arg: YearArg) -> Self {
        match arg {
            YearArg::Auto => YearDisplay::Auto,
            YearArg::Always => YearDisplay::Always,
            YearArg::Never => YearDisplay::Never,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeArg {
    Short,
    Medium,
}

impl From<TimeArg> for TimeFormat {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::Short => TimeFormat::Short,
            TimeArg::Medium => TimeFormat::Medium,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = resolve_config(&cli)?;
    let formatter = config
        .formatter()
        .with_context(|| format!("Unsupported locale: {}", config.locale))?;
    let clock = resolve_clock(cli.now.as_deref(), &config)?;
    let tz = config.timezone;

    match cli.command {
        Commands::Grid { month, json } => {
            let grid = month_grid(month.as_deref(), &config, clock.as_ref())?;
            let rendered = if json {
                serde_json::to_string_pretty(&grid)?
            } else {
                render_grid(&grid, &formatter, &config)
            };
            write_output(None, &format!("{rendered}\n"))?;
        }
        Commands::Format {
            start,
            end,
            all_day,
            no_weekday,
            year,
            location,
            time_format,
        } => {
            let opts = FormatOptions {
                all_day,
                timezone: tz,
                include_weekday: !no_weekday,
                include_year: year.into(),
                include_location: location,
                time_format: time_format.into(),
            };
            let label = format_date_range(&start, &end, &opts, &formatter, clock.as_ref());
            println!("{label}");
        }
        Commands::Layout {
            month,
            input,
            output,
        } => {
            let grid = month_grid(month.as_deref(), &config, clock.as_ref())?;
            let raw = read_input(input.as_deref())?;
            let events = parse_events_json(&raw, tz).context("Failed to parse events")?;
            let visible = filter_window(&events, &grid.window);
            tracing::debug!(
                total = events.len(),
                visible = visible.len(),
                "filtered events to grid window"
            );
            let layout = layout_month(&visible, &grid, &config);
            let json = serde_json::to_string_pretty(&layout)?;
            write_output(output.as_deref(), &format!("{json}\n"))?;
        }
        Commands::Upcoming {
            input,
            days,
            limit,
            json,
        } => {
            let raw = read_input(input.as_deref())?;
            let events = parse_events_json(&raw, tz).context("Failed to parse events")?;
            let days = days.unwrap_or(config.upcoming_days);
            let limit = limit.unwrap_or(config.upcoming_limit);
            let upcoming = upcoming_events(&events, clock.now(), tz, days, limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&upcoming)?);
            } else if upcoming.is_empty() {
                println!("No upcoming events");
            } else {
                for event in upcoming {
                    let opts = FormatOptions {
                        all_day: event.is_all_day,
                        timezone: tz,
                        include_location: event.location.clone(),
                        ..FormatOptions::default()
                    };
                    let label = format_instant_range(
                        event.start_time,
                        event.end_time,
                        &opts,
                        &formatter,
                        clock.as_ref(),
                    );
                    println!("{}\n  {}", event.title, label);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    Ok(())
}

/// Config file (or defaults) with `--tz` and `--locale` applied on top.
fn resolve_config(cli: &Cli) -> Result<CalendarConfig> {
    let mut config = match &cli.config {
        Some(path) => CalendarConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CalendarConfig::default(),
    };

    if let Some(name) = &cli.tz {
        config.timezone = civil::parse_timezone(name)?;
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }
    Ok(config)
}

fn resolve_clock(now: Option<&str>, config: &CalendarConfig) -> Result<Box<dyn Clock>> {
    match now {
        Some(raw) => {
            let instant = civil::require_instant(raw, config.timezone)
                .with_context(|| format!("Invalid --now value: {raw}"))?;
            Ok(Box::new(FixedClock(instant)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

fn month_grid(month: Option<&str>, config: &CalendarConfig, clock: &dyn Clock) -> Result<MonthGrid> {
    let today = clock.today(config.timezone);
    let reference = match month {
        Some(raw) => civil::parse_month(raw)?,
        None => today,
    };
    Ok(build_month_grid(reference, config.timezone, today))
}

/// Render a grid as a `cal`-style text block. Today carries a trailing `*`.
fn render_grid(grid: &MonthGrid, formatter: &ChronoFormatter, config: &CalendarConfig) -> String {
    let label = CalendarView::new(grid.first_of_month).month_label(formatter, config.timezone);
    let mut lines = vec![label, WEEKDAY_LABELS.join(" ")];
    for week in &grid.weeks {
        let row: String = week
            .cells
            .iter()
            .map(|cell| {
                let day = if cell.in_month {
                    cell.date.day().to_string()
                } else {
                    ".".to_string()
                };
                format!("{day:>3}{}", if cell.is_today { "*" } else { " " })
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
