//! Clear command: drop the cached events of a week

use colored::*;

use super::shared::CommandSummary;
use crate::Result;
use crate::app::services::sync::SyncOrchestrator;
use crate::cli::args::ClearArgs;

/// Run the clear command
pub async fn run_clear(args: &ClearArgs, orchestrator: SyncOrchestrator) -> Result<CommandSummary> {
    let week = args.week.to_key()?;
    orchestrator.clear_week(&week).await?;

    println!("{} cached events for {}", "Cleared".yellow().bold(), week);
    Ok(CommandSummary::default())
}
