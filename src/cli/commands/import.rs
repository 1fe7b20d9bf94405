//! Import command: ingest an export file and overwrite the week

use tracing::{info, warn};

use super::shared::{CommandSummary, print_events};
use crate::app::services::sync::SyncOrchestrator;
use crate::cli::args::ImportArgs;
use crate::{Error, Result};

/// Run the import command
pub async fn run_import(
    args: &ImportArgs,
    orchestrator: SyncOrchestrator,
) -> Result<CommandSummary> {
    args.validate()?;
    let week = args.week.to_key()?;

    let text = tokio::fs::read_to_string(&args.input).await.map_err(|e| {
        Error::io(format!("Failed to read export {}", args.input.display()), e)
    })?;

    info!("Importing {} into {}", args.input.display(), week);
    let outcome = orchestrator.import_text(&week, &text).await?;

    if let Some(stats) = &outcome.stats {
        for error in &stats.parse.errors {
            warn!("{}", error);
        }
        info!(
            "Parse success rate {:.1}% ({} of {} records)",
            stats.parse.success_rate(),
            stats.parse.records_parsed,
            stats.parse.total_records
        );
    }

    print_events(&week, &outcome.events, outcome.source, args.format)?;
    Ok(CommandSummary::from_outcome(&outcome))
}
