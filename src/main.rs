use chemstats::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command, aborting on Ctrl+C
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(chemstats::Error::validation(
                    "Operation interrupted by user".to_string(),
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - output has already been emitted by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Chemstats - Equipment Parameter Statistics Pipeline");
    println!("===================================================");
    println!();
    println!("Ingest CSV uploads of chemical-equipment parameter readings, keep each");
    println!("owner's five most recent uploads, and serve aggregated statistics,");
    println!("history and renderer-ready report models as JSON.");
    println!();
    println!("USAGE:");
    println!("    chemstats <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a CSV file of equipment parameter readings");
    println!("    stats       Show aggregated statistics for an upload");
    println!("    history     List the upload history (newest first)");
    println!("    delete      Delete an upload and all of its readings");
    println!("    report      Produce a renderer-ready report model as JSON");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a CSV upload for a user:");
    println!("    chemstats import readings.csv --user alice");
    println!();
    println!("    # Statistics for the most recent upload:");
    println!("    chemstats stats --user alice");
    println!();
    println!("    # Report model for a specific upload, written to a file:");
    println!("    chemstats report --upload-id 3 --user alice --output report.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    chemstats <COMMAND> --help");
}
