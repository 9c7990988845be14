//! Command-line argument definitions for the vision screening tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{CheckConfig, ServeConfig};
use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_FILE_PATTERN, DEFAULT_LOG_LEVEL, DEFAULT_MAX_BODY_BYTES,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for the vision screening export tool
///
/// Checks, renders and serves the semicolon-delimited measurement exports
/// written by vision screening devices.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vision-screening",
    version,
    about = "Strict parser and upload service for vision screening device exports",
    long_about = "Reads the semicolon-delimited v1 exports written by vision screening \
                  devices. Every document either parses completely or is rejected with \
                  the line and column of the first offending token."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse export files and report which ones are valid
    Check(CheckArgs),
    /// Parse one export and print its records
    Render(RenderArgs),
    /// Run the HTTP upload service
    Serve(ServeArgs),
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Export files, or directories searched recursively
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// File name pattern used while walking directories
    #[arg(
        short = 'p',
        long = "pattern",
        value_name = "GLOB",
        default_value = DEFAULT_FILE_PATTERN,
        help = "File name pattern applied inside directories"
    )]
    pub pattern: String,

    /// Stop at the first file that fails to parse
    #[arg(long = "fail-fast", help = "Stop at the first failing file")]
    pub fail_fast: bool,
}

/// Arguments for the render command
#[derive(Debug, Clone, Parser)]
pub struct RenderArgs {
    /// Export file to render
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format for the parsed records
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "wire",
        help = "Output format for records"
    )]
    pub format: RenderFormat,
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address and port to listen on
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDR",
        default_value = DEFAULT_BIND_ADDRESS,
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    /// Directory with static files served under /assets/
    #[arg(
        long = "assets-dir",
        value_name = "DIR",
        help = "Directory served under /assets/"
    )]
    pub assets_dir: Option<PathBuf>,

    /// Largest accepted upload body
    #[arg(
        long = "max-body-bytes",
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_BODY_BYTES,
        help = "Largest accepted upload body in bytes"
    )]
    pub max_body_bytes: usize,
}

/// Output format options for rendered records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Semicolon-delimited rows, header first
    Wire,
    /// One JSON object per record
    Json,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => DEFAULT_LOG_LEVEL,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl From<CheckArgs> for CheckConfig {
    fn from(args: CheckArgs) -> Self {
        Self {
            paths: args.paths,
            pattern: args.pattern,
            fail_fast: args.fail_fast,
        }
    }
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            bind: args.bind,
            assets_dir: args.assets_dir,
            max_body_bytes: args.max_body_bytes,
        }
    }
}
