//! Show command: print the cached events of a week

use super::shared::{CommandSummary, print_events};
use crate::Result;
use crate::app::services::sync::{SourceKind, SyncOrchestrator};
use crate::cli::args::ShowArgs;

/// Run the show command
pub async fn run_show(args: &ShowArgs, orchestrator: SyncOrchestrator) -> Result<CommandSummary> {
    let week = args.week.to_key()?;
    let events = orchestrator.read_week(&week).await?;

    print_events(&week, &events, Some(SourceKind::Cache), args.format)?;

    Ok(CommandSummary {
        events: events.len(),
        source: Some(SourceKind::Cache),
        ..CommandSummary::default()
    })
}
