//! Shared components for CLI commands
//!
//! This module contains the logging setup, configuration loading,
//! orchestrator wiring and event output used by every command.

use colored::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::Result;
use crate::app::models::{CanonicalEvent, WeekKey, WorkItem};
use crate::app::services::equipment_registry::EquipmentRegistry;
use crate::app::services::pipeline::IngestStats;
use crate::app::services::sync::{
    EventCache, JsonCalendarSource, JsonFileCache, MemoryEventCache, SourceKind, SyncOrchestrator,
    SyncOutcome, UserIdentity,
};
use crate::cli::args::{CommonArgs, OutputFormat};
use crate::config::Config;

/// Summary of one command run, reported back to `main`
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    /// Events returned or written by the command
    pub events: usize,
    /// Strategy that produced the events, for fetch and import
    pub source: Option<SourceKind>,
    /// Records dropped by the ingestion pipeline
    pub records_dropped: usize,
}

impl CommandSummary {
    pub fn from_outcome(outcome: &SyncOutcome) -> Self {
        Self {
            events: outcome.events.len(),
            source: outcome.source,
            records_dropped: outcome
                .stats
                .as_ref()
                .map(IngestStats::total_dropped)
                .unwrap_or_default(),
        }
    }
}

/// Set up structured logging
pub fn setup_logging(args: &CommonArgs, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(&config.logging.level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("calendar_ingest={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    args.validate()?;

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(cache_dir) = &args.cache_dir {
        config.cache.directory = cache_dir.clone();
    }
    if let Some(user_id) = &args.user_id {
        config.identity.fallback_user_id = Some(user_id.clone());
    }
}

/// Wire cache, native source, identity and registry from configuration
pub fn build_orchestrator(
    config: &Config,
    cancellation_token: CancellationToken,
) -> SyncOrchestrator {
    let cache: Arc<dyn EventCache> = if config.cache.enabled {
        info!("Using event cache at {}", config.cache.directory.display());
        Arc::new(JsonFileCache::new(&config.cache.directory))
    } else {
        info!("Event cache disabled; events are kept in memory only");
        Arc::new(MemoryEventCache::new())
    };

    let registry = Arc::new(EquipmentRegistry::from_entries(config.equipment.clone()));
    let identity = UserIdentity::new(
        Some(config.session_file()),
        config.identity.fallback_user_id.clone(),
    );

    let orchestrator =
        SyncOrchestrator::new(cache, registry, identity).with_cancellation(cancellation_token);

    match &config.source.native_calendar_file {
        Some(path) => {
            debug!("Native calendar dump configured at {}", path.display());
            orchestrator.with_source(Arc::new(JsonCalendarSource::new(path)))
        }
        None => orchestrator,
    }
}

/// Write a week's events to stdout in the requested format
pub fn print_events(
    week: &WeekKey,
    events: &[CanonicalEvent],
    source: Option<SourceKind>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print_human(week, events, source);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(events)?);
            Ok(())
        }
        OutputFormat::WorkItems => {
            let items: Vec<WorkItem> = events.iter().map(CanonicalEvent::to_work_item).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
            Ok(())
        }
    }
}

fn print_human(week: &WeekKey, events: &[CanonicalEvent], source: Option<SourceKind>) {
    let window = week.window();
    let origin = source
        .map(|s| format!(" from {}", s))
        .unwrap_or_default();
    println!(
        "{} {} .. {}: {} events{}",
        week.to_string().bold(),
        window.start,
        window.end,
        events.len(),
        origin
    );

    if events.is_empty() {
        println!("   {}", "No events".dimmed());
        return;
    }

    let mut sorted: Vec<&CanonicalEvent> = events.iter().collect();
    sorted.sort_by_key(|event| event.start_time);
    for event in sorted {
        println!("{}", format_event_line(event));
        if let Some(details) = format_event_details(event) {
            println!("      {}", details.dimmed());
        }
    }
}

/// One-line summary of an event: day, time range and subject
pub fn format_event_line(event: &CanonicalEvent) -> String {
    let time = if event.is_all_day {
        "all day    ".to_string()
    } else {
        format!(
            "{}-{}",
            event.start_time.format("%H:%M"),
            event.end_time.format("%H:%M")
        )
    };
    format!(
        "   • {} {}  {}",
        event.start_time.format("%m/%d %a"),
        time.cyan(),
        event.subject.bold()
    )
}

/// Secondary line with location, codes and equipment, if any are set
pub fn format_event_details(event: &CanonicalEvent) -> Option<String> {
    let mut parts = Vec::new();
    if !event.location.is_empty() {
        parts.push(format!("@ {}", event.location));
    }
    if !event.category_code.is_empty() {
        parts.push(format!("category {}", event.category_code));
    }
    if !event.activity_code.is_empty() && event.activity_code != event.category_code {
        parts.push(format!("activity {}", event.activity_code));
    }
    if !event.status.is_empty() {
        parts.push(format!("status {}", event.status));
    }
    if !event.equipment_number.is_empty() {
        let name = if event.equipment_display_name.is_empty() {
            "unresolved"
        } else {
            event.equipment_display_name.as_str()
        };
        parts.push(format!("equipment {} ({})", event.equipment_number, name));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn event() -> CanonicalEvent {
        let day = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        CanonicalEvent::new(
            "csv_1_0",
            "定例会議",
            day.and_hms_opt(13, 0, 0).unwrap(),
            day.and_hms_opt(14, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        let args = CommonArgs {
            cache_dir: Some(PathBuf::from("/tmp/override")),
            user_id: Some("u-9".to_string()),
            ..CommonArgs::default()
        };

        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.cache.directory, PathBuf::from("/tmp/override"));
        assert_eq!(config.identity.fallback_user_id.as_deref(), Some("u-9"));
    }

    #[test]
    fn test_event_line_contains_time_and_subject() {
        let line = format_event_line(&event());
        assert!(line.contains("13:00"));
        assert!(line.contains("14:30"));
        assert!(line.contains("定例会議"));
    }

    #[test]
    fn test_event_details() {
        let mut event = event();
        assert_eq!(format_event_details(&event), None);

        event.location = "A-101".to_string();
        event.category_code = "PP01".to_string();
        event.activity_code = "PP01".to_string();
        event.equipment_number = "9999".to_string();
        let details = format_event_details(&event).unwrap();
        assert!(details.contains("@ A-101"));
        assert!(details.contains("category PP01"));
        assert!(!details.contains("activity"));
        assert!(details.contains("equipment 9999 (unresolved)"));
    }

    #[test]
    fn test_summary_from_outcome() {
        let outcome = SyncOutcome {
            events: vec![event()],
            source: Some(SourceKind::Manual),
            transitions: Vec::new(),
            stats: Some(IngestStats {
                dates_rejected: 2,
                ..IngestStats::default()
            }),
        };
        let summary = CommandSummary::from_outcome(&outcome);
        assert_eq!(summary.events, 1);
        assert_eq!(summary.source, Some(SourceKind::Manual));
        assert_eq!(summary.records_dropped, 2);
    }
}
