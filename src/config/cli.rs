//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// rexsl-fetch: send one HTTP request and print the response
///
/// Builds an immutable request from options and an optional config file,
/// fetches it with bounded retries and prints the response.
#[derive(Debug, Parser)]
#[command(name = "rexsl-fetch")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL (required unless set in config file)
    pub url: Option<String>,

    /// HTTP method
    #[arg(long, short = 'X')]
    pub method: Option<String>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", short = 'H', value_name = "K=V")]
    pub headers: Vec<String>,

    /// Query parameter appended to the URL (can be specified multiple times)
    #[arg(long = "query", value_name = "K=V")]
    pub query: Vec<String>,

    /// Path appended to the URL (can be specified multiple times)
    #[arg(long = "path", value_name = "SEG")]
    pub paths: Vec<String>,

    /// Request body
    #[arg(long, short = 'd', conflicts_with = "form")]
    pub data: Option<String>,

    /// Form parameter sent as body (can be specified multiple times)
    #[arg(long = "form", value_name = "K=V")]
    pub form: Vec<String>,

    /// Maximum number of attempts, including the first one
    #[arg(long = "retry-max")]
    pub retry_max: Option<u32>,

    /// Delay before the first retry in milliseconds
    #[arg(long = "retry-delay-ms")]
    pub retry_delay_ms: Option<u64>,

    /// Send the request exactly once
    #[arg(long = "no-retry")]
    pub no_retry: bool,

    /// Timeout for one exchange in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Log every request and response in full
    #[arg(long = "verbose-wire")]
    pub verbose_wire: bool,

    /// Print the status line and headers before the body
    #[arg(long, short = 'i')]
    pub include: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for rexsl-fetch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
