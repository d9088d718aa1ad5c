//! zonewise CLI - timezone lookup and DST-aware conversion.
//!
//! # Usage
//!
//! ```bash
//! # Current time in a zone
//! zonewise current Europe/Paris
//!
//! # Convert noon UTC to Tokyo
//! zonewise convert "2023-06-15 12:00:00" --from UTC --to Asia/Tokyo
//!
//! # Custom input format via environment
//! export ZONEWISE_FORMAT="%d/%m/%Y %H:%M"
//! zonewise convert "15/06/2023 14:30" --from UTC --to US/Pacific
//!
//! # JSON output for scripting
//! zonewise --json search america | jq length
//!
//! # Interactive prompt
//! zonewise shell
//! ```

mod cli;
mod commands;
mod output;
mod shell;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Initialize tracing subscriber with environment-based filtering.
///
/// - `quiet`: Suppress all logging output
/// - `verbose`: Enable debug-level logging
///
/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.global.is_quiet, cli.global.is_verbose);

    cli.run()
}
