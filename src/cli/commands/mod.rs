//! Command implementations for the calendar-ingest CLI
//!
//! Each command is implemented in its own module. All of them share the
//! configuration, logging and orchestrator wiring in [`shared`].

pub mod add;
pub mod clear;
pub mod fetch;
pub mod import;
pub mod shared;
pub mod show;

pub use shared::CommandSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Main command runner
///
/// Loads configuration, initializes logging and dispatches to the
/// subcommand handler:
/// - `fetch`: strategy chain (cache, native calendar, manual text)
/// - `import`: manual ingestion overwriting the week's cache slot
/// - `add`: append one hand-made event
/// - `show`: print the cached week
/// - `clear`: drop the cached week
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<CommandSummary> {
    let command = args.get_command()?;

    let config = shared::load_configuration(&args.common)?;
    shared::setup_logging(&args.common, &config)?;
    debug!("Effective configuration: {:?}", config);

    let orchestrator = shared::build_orchestrator(&config, cancellation_token);

    match command {
        Commands::Fetch(fetch_args) => fetch::run_fetch(fetch_args, orchestrator).await,
        Commands::Import(import_args) => import::run_import(import_args, orchestrator).await,
        Commands::Add(add_args) => add::run_add(add_args, orchestrator).await,
        Commands::Show(show_args) => show::run_show(show_args, orchestrator).await,
        Commands::Clear(clear_args) => clear::run_clear(clear_args, orchestrator).await,
    }
}
