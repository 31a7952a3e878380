//! # Chronology CLI Module
//!
//! This module implements the CLI interface for the record scanner.
//!
//! ## Available Commands
//!
//! - `scan` - Classify every record of an archive and print the run report
//! - `inspect` - Show the header fields of the first records
//! - `pack` - Pack a directory of raw record files into an archive
//! - `hash` - Compute the BLAKE3 digest of an archive

mod commands;

use crate::config::Config;
use chronology_core::ChronologyError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Chronology - record scanner
///
/// Classifies serialized concept, semantic, pattern and stamp chronologies
/// by their header type token and reports per-kind counts and timing.
#[derive(Parser, Debug)]
#[command(name = "chronology")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the config file (default: ./chronology.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify all records of an archive
    Scan {
        /// Path to the record archive
        #[arg(short, long)]
        file: PathBuf,

        /// Worker count (0 = one per CPU); overrides config
        #[arg(short, long)]
        workers: Option<usize>,

        /// Fail on records with an unknown type token
        #[arg(long)]
        strict: bool,

        /// Run name shown in the report (default: archive file name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show header fields of the first records of an archive
    Inspect {
        /// Path to the record archive
        #[arg(short, long)]
        file: PathBuf,

        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Pack every file of a directory (sorted by name) as one record each
    Pack {
        /// Input directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output archive path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compute BLAKE3 digest of an archive
    Hash {
        /// Path to the record archive
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and the loaded configuration.
pub async fn execute(cli: Cli, config: &Config) -> Result<(), ChronologyError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Scan {
            file,
            workers,
            strict,
            name,
        } => {
            let options = ScanOptions {
                workers: workers.unwrap_or(config.scan.workers),
                strict: strict || config.scan.strict,
                name,
            };
            cmd_scan(&file, &options, json_mode).await
        }
        Commands::Inspect { file, limit } => cmd_inspect(&file, limit, json_mode).await,
        Commands::Pack { input, output } => cmd_pack(&input, &output, json_mode).await,
        Commands::Hash { file } => cmd_hash(&file, json_mode).await,
    }
}
