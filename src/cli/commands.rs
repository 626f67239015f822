//! Command implementations for the chemstats CLI
//!
//! This module contains the command execution logic: configuration and
//! logging setup, dispatch to the pipeline services, and JSON output at the
//! boundary the external presentation layers consume.

use colored::Colorize;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use crate::app::models::Requester;
use crate::app::services::csv_parser;
use crate::app::services::stats_query::StatsService;
use crate::app::services::upload_store::Database;
use crate::cli::args::{
    Args, Commands, DeleteArgs, HistoryArgs, ImportArgs, ReportArgs, StatsArgs,
};
use crate::config::Config;
use crate::{Error, Result};

/// Main command runner for the chemstats CLI
///
/// Orchestrates one pipeline operation end to end:
/// 1. Set up logging and configuration
/// 2. Open the upload store (applying migrations)
/// 3. Dispatch to the requested operation
/// 4. Emit the JSON-shaped boundary output
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    info!("Starting chemstats");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = resolve_config(&args);
    config.validate()?;

    let Some(command) = args.command.clone() else {
        return Ok(());
    };

    let db = Database::open(&config.store)?;

    match command {
        Commands::Import(cmd) => run_import(&db, &config, &cmd, args.quiet).await,
        Commands::Stats(cmd) => run_stats(&db, &cmd).await,
        Commands::History(cmd) => run_history(&db, &cmd).await,
        Commands::Delete(cmd) => run_delete(&db, &cmd, args.quiet).await,
        Commands::Report(cmd) => run_report(&db, &cmd, args.quiet).await,
    }
}

/// Parse, aggregate and commit one CSV upload
async fn run_import(db: &Database, config: &Config, cmd: &ImportArgs, quiet: bool) -> Result<()> {
    let start = Instant::now();

    let metadata = std::fs::metadata(&cmd.file)
        .map_err(|e| Error::io(format!("failed to stat '{}'", cmd.file.display()), e))?;
    if metadata.len() > config.ingest.max_file_size_bytes {
        return Err(Error::validation(format!(
            "file size {} bytes exceeds the {} byte limit",
            metadata.len(),
            config.ingest.max_file_size_bytes
        )));
    }

    let bytes = std::fs::read(&cmd.file)
        .map_err(|e| Error::io(format!("failed to read '{}'", cmd.file.display()), e))?;
    let file_name = cmd
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.csv");

    let outcome = csv_parser::parse(&bytes, file_name)?;
    let stats = outcome.stats;
    let commit = db
        .commit_upload(&cmd.user, file_name, outcome.readings)
        .await?;

    print_json(&commit)?;

    if !quiet {
        eprintln!(
            "{} upload {} for '{}': {} rows imported, {} skipped ({:.1?})",
            "Imported".green().bold(),
            commit.upload_id,
            cmd.user,
            commit.rows_imported,
            stats.rows_skipped,
            start.elapsed()
        );
        for defect in &stats.errors {
            eprintln!("  {} {}", "skipped".yellow(), defect);
        }
    }

    Ok(())
}

/// Aggregated statistics for one upload (or the most recent one)
async fn run_stats(db: &Database, cmd: &StatsArgs) -> Result<()> {
    let service = StatsService::new(db.clone());
    let stats = service
        .stats_for(cmd.upload_id, &requester(&cmd.user, cmd.admin))
        .await?;
    print_json(&stats)
}

/// The requester's upload history, newest first
async fn run_history(db: &Database, cmd: &HistoryArgs) -> Result<()> {
    let service = StatsService::new(db.clone());
    let history = service.history_for(&requester(&cmd.user, false)).await?;
    print_json(&history)
}

/// Delete one upload, cascading its readings
async fn run_delete(db: &Database, cmd: &DeleteArgs, quiet: bool) -> Result<()> {
    let service = StatsService::new(db.clone());
    service
        .delete(cmd.upload_id, &requester(&cmd.user, cmd.admin))
        .await?;

    if !quiet {
        eprintln!(
            "{} upload {} and its readings",
            "Deleted".green().bold(),
            cmd.upload_id
        );
    }
    Ok(())
}

/// Assemble a renderer-ready report model and write it as JSON
async fn run_report(db: &Database, cmd: &ReportArgs, quiet: bool) -> Result<()> {
    let service = StatsService::new(db.clone());
    let model = service
        .report_for(cmd.upload_id, &requester(&cmd.user, cmd.admin))
        .await?;

    let json = serde_json::to_string_pretty(&model)?;
    match &cmd.output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .map_err(|e| Error::io(format!("failed to write '{}'", path.display()), e))?;
            if !quiet {
                eprintln!(
                    "{} report model to {}",
                    "Wrote".green().bold(),
                    path.display()
                );
            }
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn requester(user: &str, admin: bool) -> Requester {
    if admin {
        Requester::admin(user)
    } else {
        Requester::user(user)
    }
}

fn resolve_config(args: &Args) -> Config {
    match &args.database {
        Some(path) => Config::with_database_path(path.clone()),
        None => Config::default(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chemstats={}", log_level)));

    // Set up subscriber based on output format preference
    if args.quiet {
        // Minimal logging for quiet mode
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
        // Standard logging with timestamps
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
