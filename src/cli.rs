// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `procgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procgate",
    version,
    about = "Launch a program through the process gateway.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run to completion, then print the captured stdout/stderr.
    Run {
        /// Interpret the command through the system shell.
        #[arg(long)]
        shell: bool,

        executable: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Start the process and stream its output while it runs.
    Start {
        /// Interpret the command through the system shell.
        #[arg(long)]
        shell: bool,

        /// Working directory for the child.
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        executable: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
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
