//! Command-line argument definitions for the chemstats pipeline
//!
//! This module defines the CLI interface using the clap derive API. Each
//! subcommand maps 1:1 onto a boundary operation of the pipeline: import,
//! stats, history, delete and report. Authentication is external; the CLI
//! trusts its caller and threads the resolved requester identity (plus the
//! admin override flag) into every call.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the chemstats pipeline
///
/// Ingests CSV files of chemical-equipment parameter readings, keeps each
/// owner's five most recent uploads, and serves aggregated statistics,
/// history and renderer-ready report models as JSON.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "chemstats",
    version,
    about = "Ingest equipment-parameter CSV uploads and serve aggregated statistics",
    long_about = "Ingestion, aggregation and retention pipeline for chemical-equipment \
                  parameter readings. Uploads are parsed and validated, committed \
                  atomically together with their readings, and trimmed so that each \
                  owner keeps at most the five most recent uploads. Statistics, \
                  history and report models are emitted as JSON for external \
                  presentation layers."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the SQLite database file
    ///
    /// Defaults to chemstats/chemstats.db under the platform data directory.
    #[arg(long = "database", value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything except errors and the JSON output
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available subcommands for the chemstats pipeline
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a CSV file of equipment parameter readings
    Import(ImportArgs),
    /// Show aggregated statistics for an upload
    Stats(StatsArgs),
    /// List the upload history (newest first, at most five entries)
    History(HistoryArgs),
    /// Delete an upload and all of its readings
    Delete(DeleteArgs),
    /// Produce a renderer-ready report model as JSON
    Report(ReportArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV file to import
    ///
    /// Must carry a header row with at least the columns equipment_name,
    /// parameter_name and value; unit and type are optional.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Owning identity the upload is imported for
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: String,
}

/// Arguments for the stats command
#[derive(Debug, Clone, Parser)]
pub struct StatsArgs {
    /// Upload to aggregate; defaults to the requester's most recent one
    #[arg(long = "upload-id", value_name = "ID")]
    pub upload_id: Option<i64>,

    /// Requesting identity
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: String,

    /// Act with the admin override capability (access any owner's uploads)
    #[arg(long = "admin")]
    pub admin: bool,
}

/// Arguments for the history command
#[derive(Debug, Clone, Parser)]
pub struct HistoryArgs {
    /// Requesting identity
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: String,
}

/// Arguments for the delete command
#[derive(Debug, Clone, Parser)]
pub struct DeleteArgs {
    /// Upload to delete, together with all of its readings
    #[arg(value_name = "ID")]
    pub upload_id: i64,

    /// Requesting identity
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: String,

    /// Act with the admin override capability (delete any owner's uploads)
    #[arg(long = "admin")]
    pub admin: bool,
}

/// Arguments for the report command
#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Upload to report on; defaults to the requester's most recent one
    #[arg(long = "upload-id", value_name = "ID")]
    pub upload_id: Option<i64>,

    /// Requesting identity
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: String,

    /// Act with the admin override capability
    #[arg(long = "admin")]
    pub admin: bool,

    /// Write the JSON report model here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Validate the arguments for consistency before any work starts
    pub fn validate(&self) -> Result<()> {
        let user = match &self.command {
            Some(Commands::Import(cmd)) => Some(&cmd.user),
            Some(Commands::Stats(cmd)) => Some(&cmd.user),
            Some(Commands::History(cmd)) => Some(&cmd.user),
            Some(Commands::Delete(cmd)) => Some(&cmd.user),
            Some(Commands::Report(cmd)) => Some(&cmd.user),
            None => None,
        };

        if let Some(user) = user {
            if user.trim().is_empty() {
                return Err(Error::configuration("user identity must not be empty"));
            }
        }

        if let Some(Commands::Import(cmd)) = &self.command {
            if !cmd.file.exists() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    cmd.file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get effective log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_user_rejected() {
        let args = Args {
            command: Some(Commands::History(HistoryArgs {
                user: "  ".to_string(),
            })),
            database: None,
            verbose: 0,
            quiet: false,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level_mapping() {
        let mut args = Args {
            command: None,
            database: None,
            verbose: 0,
            quiet: false,
        };
        assert_eq!(args.get_log_level(), "warn");
        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }
}
