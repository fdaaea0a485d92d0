//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::command::NotifyFlags;
use crate::config::Environment;

/// Periodic HTTP notification sender
#[derive(Parser, Debug)]
#[command(name = "notifier-rs")]
#[command(about = "Send an HTTP notification to an endpoint on a fixed interval")]
#[command(long_about = "
notifier-rs repeatedly POSTs a message to one or more HTTP endpoints on a
fixed interval and reports failed attempts, until it is stopped with Ctrl+C
or SIGTERM.

EXAMPLES:
    # Interactive console (default); type `notify --help` for the grammar
    notifier-rs

    # Same, with request/response dumps
    notifier-rs --verbose listen

    # Start a single loop straight from the command line
    notifier-rs send --url http://localhost:8080/notify -m \"content to be sent\" -i 10s

    # Send a file every 500ms without printing failures
    notifier-rs send --url http://localhost:8080/notify -f message.json -i 500ms --silent

    # Check configuration without sending anything
    notifier-rs --config /etc/notifier/production.toml listen --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/notifier/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` overlay is loaded.
    ///
    /// Available values: development (dev), test, production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose output
    ///
    /// Raises logging to debug level and dumps every outgoing request and
    /// every successful response. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Reduces log output to error level only. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read `notify` commands from stdin (default)
    ///
    /// Prints the command help, then starts one notification loop per
    /// `notify --url ...` line. Loops run until the process is stopped.
    ///
    /// Examples:
    ///   notifier-rs listen
    ///   notifier-rs listen --dry-run
    Listen {
        /// Log level override
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },

    /// Start a single notification loop from arguments
    ///
    /// Examples:
    ///   notifier-rs send --url http://localhost:8080/notify -m "hello"
    ///   notifier-rs send --url http://localhost:8080/notify -f body.txt -i 1m --silent
    Send(SendArgs),
}

/// Arguments of the `send` subcommand
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Target endpoint (absolute http or https URL)
    #[arg(long, value_name = "URL", value_parser = super::validation::validate_target_url)]
    pub url: String,

    /// Message to send
    #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
    pub message: Option<String>,

    /// Send the content of this file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Notification interval, e.g. 500ms, 5s, 1m30s
    ///
    /// Default: `dispatch.default_interval` from the configuration (5s)
    #[arg(short, long, value_name = "DURATION", value_parser = super::validation::validate_interval)]
    pub interval: Option<Duration>,

    /// Do not print failed attempts
    #[arg(long)]
    pub silent: bool,

    /// Log level override
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Validate configuration and arguments, then exit
    #[arg(long)]
    pub dry_run: bool,
}

impl SendArgs {
    pub fn to_flags(&self) -> NotifyFlags {
        NotifyFlags {
            interval: self.interval,
            message: self.message.clone(),
            file: self.file.clone(),
            silent: self.silent,
        }
    }
}

/// Log level options
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Send(args)) = &self.command {
            if args.message.is_none() && args.file.is_none() {
                return Err("send requires a message (-m) or a file (-f)".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }

    pub fn is_dry_run(&self) -> bool {
        match &self.command {
            Some(Commands::Listen { dry_run, .. }) => *dry_run,
            Some(Commands::Send(args)) => args.dry_run,
            None => false,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}
