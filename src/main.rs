use calendar_ingest::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Time a cancelled command gets to wind down before the process exits
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let command = commands::run(args, cancellation_token.clone());
        tokio::pin!(command);

        tokio::select! {
            result = &mut command => result,
            Ok(()) = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, cancelling...");
                cancellation_token.cancel();

                // Cancelled prompts and queries resolve to "no data"
                match tokio::time::timeout(SHUTDOWN_GRACE, &mut command).await {
                    Ok(result) => result,
                    Err(_) => Err(calendar_ingest::Error::processing_interrupted(
                        "Interrupted by user",
                    )),
                }
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Events have already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("calendar-ingest - Weekly work events from calendar exports");
    println!("==========================================================");
    println!();
    println!("Parse calendar export text into canonical work events, filter them");
    println!("to a (year, week) window and keep a per-week cache of the results.");
    println!();
    println!("USAGE:");
    println!("    calendar-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    fetch     Resolve a week from cache, native calendar or manual text");
    println!("    import    Ingest an export file, replacing the week's cached events");
    println!("    add       Add one event by hand to a week");
    println!("    show      Show the cached events of a week");
    println!("    clear     Drop the cached events of a week");
    println!("    help      Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    --config <FILE>      Configuration file (TOML)");
    println!("    --cache-dir <PATH>   Directory for cached weekly events");
    println!("    --user-id <ID>       Fallback user id for the employee number");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -q, --quiet          Suppress output except errors");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Ingest an export for week 32 of 2025:");
    println!("    calendar-ingest import --year 2025 --week 32 --input export.csv");
    println!();
    println!("    # Fetch a week, falling back to pasted text on a cache miss:");
    println!("    calendar-ingest fetch --year 2025 --week 32 --stdin");
    println!();
    println!("    # Add a meeting by hand:");
    println!("    calendar-ingest add -y 2025 -w 32 --subject 点検 --start \"2025/8/6 10:00\"");
    println!();
    println!("    # Show the week as work grid items:");
    println!("    calendar-ingest show -y 2025 -w 32 --format work-items");
    println!();
    println!("For detailed help on any command, use:");
    println!("    calendar-ingest <COMMAND> --help");
}
