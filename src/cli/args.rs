//! Command-line argument definitions for calendar-ingest
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::models::{ManualEventInput, WeekKey};
use crate::app::services::temporal::combine;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the calendar export ingester
///
/// Turns semi-structured calendar export text into canonical weekly work
/// events and keeps a per-week cache of the results.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "calendar-ingest",
    version,
    about = "Ingest calendar export text into typed weekly work events",
    long_about = "Parses calendar export text (six quoted fields per record, with an embedded \
                  [[str]]...[[end]] metadata block in the body) into canonical work events, \
                  filters them to a (year, week) window and caches each week's set. Fetching a \
                  week tries the cache, then a configured native calendar, then manual text."
)]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// The selected subcommand
    pub fn get_command(&self) -> Result<&Commands> {
        self.command
            .as_ref()
            .ok_or_else(|| Error::configuration("No command given; see --help"))
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve a week's events from cache, native calendar or manual text
    Fetch(FetchArgs),
    /// Ingest an export file for a week, replacing its cached events
    Import(ImportArgs),
    /// Add one event by hand to a week's cached events
    Add(AddArgs),
    /// Show the cached events of a week
    Show(ShowArgs),
    /// Drop the cached events of a week
    Clear(ClearArgs),
}

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, Parser)]
pub struct CommonArgs {
    /// Configuration file
    ///
    /// Defaults to calendar-ingest/config.toml in the platform config
    /// directory when that file exists.
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Configuration file (TOML)"
    )]
    pub config_file: Option<PathBuf>,

    /// Directory holding the per-week event cache
    #[arg(
        long = "cache-dir",
        value_name = "PATH",
        global = true,
        help = "Directory for cached weekly events"
    )]
    pub cache_dir: Option<PathBuf>,

    /// User id recorded as the employee number when no session exists
    #[arg(
        long = "user-id",
        value_name = "ID",
        global = true,
        help = "Fallback user id for the employee number field"
    )]
    pub user_id: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Validate flag values that clap cannot check
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(user_id) = &self.user_id {
            if user_id.trim().is_empty() {
                return Err(Error::configuration("User id must not be blank"));
            }
        }

        Ok(())
    }

    /// Determine the log level from verbosity flags, else `configured`
    pub fn get_log_level(&self, configured: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => configured.to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

/// Target (year, week) pair
#[derive(Debug, Clone, Parser)]
pub struct WeekArgs {
    /// Calendar year of the week
    #[arg(short = 'y', long = "year", help = "Year of the target week")]
    pub year: i32,

    /// Week number; week 1 starts on the Monday on or before January 1st
    #[arg(
        short = 'w',
        long = "week",
        help = "Week number (1-53, week 1 contains January 1st)"
    )]
    pub week: u32,
}

impl WeekArgs {
    pub fn to_key(&self) -> Result<WeekKey> {
        WeekKey::new(self.year, self.week)
    }
}

/// Arguments for the fetch command
#[derive(Debug, Clone, Parser)]
pub struct FetchArgs {
    #[command(flatten)]
    pub week: WeekArgs,

    /// Export file used when the week is not cached and no native calendar answers
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        conflicts_with = "stdin",
        help = "Export file for manual ingestion"
    )]
    pub input: Option<PathBuf>,

    /// Read the export text from standard input when manual ingestion is reached
    #[arg(long = "stdin", help = "Read export text from stdin for manual ingestion")]
    pub stdin: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for events"
    )]
    pub format: OutputFormat,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub week: WeekArgs,

    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Export file to ingest"
    )]
    pub input: PathBuf,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for events"
    )]
    pub format: OutputFormat,
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}

/// Arguments for the add command
#[derive(Debug, Clone, Parser)]
pub struct AddArgs {
    #[command(flatten)]
    pub week: WeekArgs,

    #[arg(short = 's', long = "subject", help = "Event subject")]
    pub subject: Option<String>,

    /// Start as `YYYY/M/D H:MM`; defaults to now
    #[arg(long = "start", value_name = "DATETIME", help = "Start (YYYY/M/D H:MM)")]
    pub start: Option<String>,

    /// End as `YYYY/M/D H:MM`; defaults to the start
    #[arg(long = "end", value_name = "DATETIME", help = "End (YYYY/M/D H:MM)")]
    pub end: Option<String>,

    #[arg(short = 'l', long = "location", help = "Event location")]
    pub location: Option<String>,

    #[arg(short = 'd', long = "description", help = "Event description")]
    pub description: Option<String>,

    #[arg(
        short = 'a',
        long = "attendee",
        value_name = "NAME",
        help = "Attendee (repeatable)"
    )]
    pub attendees: Vec<String>,

    #[arg(long = "all-day", help = "Mark the event as all-day")]
    pub all_day: bool,
}

impl AddArgs {
    /// Convert flags into structured manual input
    pub fn to_input(&self) -> Result<ManualEventInput> {
        let start_time = self.start.as_deref().map(parse_timestamp).transpose()?;
        let end_time = match self.end.as_deref() {
            Some(end) => Some(parse_timestamp(end)?),
            None => start_time,
        };

        Ok(ManualEventInput {
            subject: self.subject.clone(),
            start_time,
            end_time,
            location: self.location.clone(),
            attendees: self.attendees.clone(),
            description: self.description.clone(),
            is_all_day: self.all_day,
        })
    }
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    #[command(flatten)]
    pub week: WeekArgs,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for events"
    )]
    pub format: OutputFormat,
}

/// Arguments for the clear command
#[derive(Debug, Clone, Parser)]
pub struct ClearArgs {
    #[command(flatten)]
    pub week: WeekArgs,
}

/// Output format options for events
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Human,
    /// Canonical events as JSON
    Json,
    /// Weekly work grid items as JSON
    WorkItems,
}

/// Parse `YYYY/M/D H:MM` (time optional, defaulting to 09:00)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let mut parts = value.split_whitespace();
    let date = parts
        .next()
        .ok_or_else(|| Error::date_parsing("empty date/time"))?;
    let time = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(Error::date_parsing(format!(
            "unexpected trailing text in '{}' (expected YYYY/M/D H:MM)",
            value
        )));
    }
    combine(date, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("calendar-ingest").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_fetch_args_with_global_flags() {
        let args = parse(&["fetch", "-y", "2025", "-w", "32", "--input", "x.csv", "-vv", "--user-id", "u1"]);
        let Some(Commands::Fetch(fetch)) = &args.command else {
            panic!("expected fetch");
        };
        assert_eq!(fetch.week.to_key().unwrap(), WeekKey::new(2025, 32).unwrap());
        assert_eq!(fetch.input, Some(PathBuf::from("x.csv")));
        assert_eq!(fetch.format, OutputFormat::Human);
        assert_eq!(args.common.verbose, 2);
        assert_eq!(args.common.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_fetch_input_conflicts_with_stdin() {
        let result = Args::try_parse_from([
            "calendar-ingest", "fetch", "-y", "2025", "-w", "1", "--input", "a", "--stdin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_work_items_format() {
        let args = parse(&["show", "--year", "2025", "--week", "2", "--format", "work-items"]);
        let Some(Commands::Show(show)) = &args.command else {
            panic!("expected show");
        };
        assert_eq!(show.format, OutputFormat::WorkItems);
    }

    #[test]
    fn test_invalid_week_rejected() {
        let args = parse(&["clear", "-y", "2025", "-w", "54"]);
        let Some(Commands::Clear(clear)) = &args.command else {
            panic!("expected clear");
        };
        assert!(clear.week.to_key().is_err());
    }

    #[test]
    fn test_log_level_selection() {
        let mut common = CommonArgs::default();
        assert_eq!(common.get_log_level("warn"), "warn");
        common.verbose = 1;
        assert_eq!(common.get_log_level("warn"), "info");
        common.verbose = 5;
        assert_eq!(common.get_log_level("warn"), "trace");
        common.verbose = 0;
        common.quiet = true;
        assert_eq!(common.get_log_level("debug"), "error");
    }

    #[test]
    fn test_common_validation() {
        let common = CommonArgs {
            config_file: Some(PathBuf::from("/definitely/missing/config.toml")),
            ..CommonArgs::default()
        };
        assert!(common.validate().is_err());

        let common = CommonArgs {
            user_id: Some("  ".to_string()),
            ..CommonArgs::default()
        };
        assert!(common.validate().is_err());
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 6)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2025/8/6 13:30").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2025/8/6").unwrap(),
            expected.date().and_hms_opt(9, 0, 0).unwrap()
        );
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2025-08-06 13:30").is_err());
        assert!(parse_timestamp("2025/8/6 13:30 extra").is_err());
    }

    #[test]
    fn test_add_args_end_defaults_to_start() {
        let args = parse(&["add", "-y", "2025", "-w", "32", "--subject", "点検", "--start", "2025/8/6 10:00"]);
        let Some(Commands::Add(add)) = &args.command else {
            panic!("expected add");
        };
        let input = add.to_input().unwrap();
        assert_eq!(input.subject.as_deref(), Some("点検"));
        assert_eq!(input.start_time, input.end_time);
        assert!(input.start_time.is_some());
    }
}
