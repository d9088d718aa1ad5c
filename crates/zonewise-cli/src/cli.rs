//! CLI argument parsing and command dispatch.
//!
//! Uses clap derive macros for declarative argument definition, with
//! environment fallbacks for the input time format.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use zonewise::{Disambiguation, TimezoneConverter, DEFAULT_TIME_FORMAT};

use crate::commands;
use crate::shell;

/// Timezone lookup and DST-aware time conversion.
#[derive(Parser)]
#[command(name = "zonewise")]
#[command(version)]
#[command(about = "Timezone lookup and DST-aware time conversion")]
#[command(long_about = "Validate and search IANA timezone names, show the current time in a \
    zone, and convert wall-clock times between zones using the DST rules in force on that date.")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global options available to all commands.
#[derive(Args, Clone)]
pub struct GlobalOptions {
    /// Output JSON instead of human-readable text.
    #[arg(long = "json", global = true)]
    pub is_json: bool,

    /// Enable verbose logging.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub is_verbose: bool,

    /// Suppress all logging output.
    #[arg(short = 'q', long = "quiet", global = true)]
    pub is_quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current time in a timezone.
    Current {
        /// IANA timezone name (e.g. "Europe/Paris").
        zone: String,
    },

    /// Convert a wall-clock time from one timezone to another.
    Convert(ConvertArgs),

    /// List common timezones, or every known timezone with --all.
    List {
        /// List every timezone in the database.
        #[arg(long)]
        all: bool,
    },

    /// Find timezones whose name contains a term (case-insensitive).
    Search {
        /// Substring to look for.
        term: String,
    },

    /// Check whether a timezone name is known. Exits non-zero if not.
    Validate {
        /// Exact, case-sensitive timezone name.
        zone: String,
    },

    /// Interactive prompt with current, convert, list and search commands.
    Shell(ShellArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Time to convert, in the source zone's local time.
    pub time: String,

    /// Source timezone.
    #[arg(long = "from")]
    pub from_zone: String,

    /// Target timezone.
    #[arg(long = "to")]
    pub to_zone: String,

    /// strftime-style format of TIME.
    #[arg(long, env = "ZONEWISE_FORMAT", default_value = DEFAULT_TIME_FORMAT)]
    pub format: String,

    /// How to read a local time inside a DST gap or overlap:
    /// compatible, earlier, later or reject.
    #[arg(long, default_value_t = Disambiguation::Compatible)]
    pub disambiguation: Disambiguation,
}

#[derive(Args)]
pub struct ShellArgs {
    /// strftime-style format for times entered at the `convert` prompt.
    #[arg(long, env = "ZONEWISE_FORMAT", default_value = DEFAULT_TIME_FORMAT)]
    pub format: String,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let converter = TimezoneConverter::new().context("failed to load timezone database")?;
        let json = self.global.is_json;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Current { zone } => {
                debug!(%zone, "current");
                commands::current(&converter, &zone, json, &mut out)
            }
            Commands::Convert(args) => {
                debug!(time = %args.time, from = %args.from_zone, to = %args.to_zone, "convert");
                commands::convert(&converter, &args, json, &mut out)
            }
            Commands::List { all } => commands::list(&converter, all, json, &mut out),
            Commands::Search { term } => commands::search(&converter, &term, json, &mut out),
            Commands::Validate { zone } => commands::validate(&converter, &zone, json, &mut out),
            Commands::Shell(args) => {
                let stdin = std::io::stdin();
                shell::run(&converter, &args.format, stdin.lock(), &mut out)
            }
        }
    }
}
