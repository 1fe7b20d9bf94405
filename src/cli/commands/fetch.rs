//! Fetch command: resolve a week through the sourcing strategy chain

use std::sync::Arc;
use tracing::info;

use super::shared::{CommandSummary, print_events};
use crate::Result;
use crate::app::services::sync::{
    FileTextPrompt, PresetText, StdinTextPrompt, SyncOrchestrator, TextPrompt,
};
use crate::cli::args::FetchArgs;

/// Run the fetch command
///
/// Never fails once the week is valid: when no strategy yields events an
/// empty week is printed.
pub async fn run_fetch(args: &FetchArgs, orchestrator: SyncOrchestrator) -> Result<CommandSummary> {
    let week = args.week.to_key()?;

    let prompt: Arc<dyn TextPrompt> = match (&args.input, args.stdin) {
        (Some(path), _) => Arc::new(FileTextPrompt::new(path)),
        (None, true) => Arc::new(StdinTextPrompt),
        (None, false) => Arc::new(PresetText::none()),
    };
    let orchestrator = orchestrator.with_prompt(prompt);

    info!("Fetching events for {}", week);
    let outcome = orchestrator.fetch_week(&week).await;

    print_events(&week, &outcome.events, outcome.source, args.format)?;
    Ok(CommandSummary::from_outcome(&outcome))
}
