//! # Chronology - record scanner
//!
//! The main binary for the chronology record classifier.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              apps/chronology (THE BINARY)            │
//! │                                                      │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │   Config    │   │ Scan pool  │  │
//! │  │   (clap)    │   │   (toml)    │   │  (tokio)   │  │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘  │
//! │         └─────────────────┼────────────────┘         │
//! │                           ▼                          │
//! │                 ┌──────────────────┐                 │
//! │                 │ chronology-core  │                 │
//! │                 │   (THE LOGIC)    │                 │
//! │                 └──────────────────┘                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! chronology pack -i records/ -o starter.chrn
//! chronology scan -f starter.chrn --workers 8
//! chronology inspect -f starter.chrn -l 5
//! chronology hash -f starter.chrn
//! ```

use chronology::cli;
use chronology::config::{Config, LogFormat};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Config first: it decides the log format.
    let config = Config::load(cli.config.as_deref()).and_then(|mut config| {
        config.apply_env()?;
        Ok(config)
    });

    let log_format = config
        .as_ref()
        .map(|c| c.log.format)
        .unwrap_or(LogFormat::Text);
    init_tracing(log_format, cli.verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, &config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the defaults.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose {
        "chronology=debug"
    } else {
        "chronology=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout carries reports.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    eprintln!(
        "chronology v{} - concept / semantic / pattern / stamp record scanner",
        env!("CARGO_PKG_VERSION")
    );
}
