// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::SortKey;

/// Command-line arguments for `ctrlsched`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ctrlsched",
    version,
    about = "Force-directed step scheduling of control-signal dependency graphs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Pipeline.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Pipeline.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CTRLSCHED_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the graph, but don't schedule.
    #[arg(long)]
    pub dry_run: bool,

    /// Row order of the schedule table (step, name, asap, slack).
    #[arg(long, value_name = "KEY", default_value = "step")]
    pub sort: SortKey,

    /// Only print zero-slack operations in the schedule table.
    #[arg(long)]
    pub critical_only: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
