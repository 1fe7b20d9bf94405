//! Add command: append one hand-made event to a week

use colored::*;

use super::shared::{CommandSummary, format_event_line};
use crate::Result;
use crate::app::services::sync::SyncOrchestrator;
use crate::cli::args::AddArgs;

/// Run the add command
pub async fn run_add(args: &AddArgs, orchestrator: SyncOrchestrator) -> Result<CommandSummary> {
    let week = args.week.to_key()?;
    let input = args.to_input()?;

    let event = orchestrator.add_manual_event(&week, input).await?;

    println!("{} {} ({})", "Added".green().bold(), event.id, week);
    println!("{}", format_event_line(&event));

    Ok(CommandSummary {
        events: 1,
        ..CommandSummary::default()
    })
}
