//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand layout:
//! - `portsweep scan <target>` - Scan a target

mod scan;

pub use scan::ScanCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// portsweep - a concurrent TCP connect port scanner.
///
/// Probes every port of a range with a pool of workers, lists the ports
/// that accept connections and can export the result as JSON, CSV or text.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP port scanner", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the scan header and progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a custom settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a target for open TCP ports
    #[command(alias = "s")]
    Scan(ScanCommand),
}

/// How a command finished, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Interrupted,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            // Conventional 128 + SIGINT
            ExitStatus::Interrupted => ExitCode::from(130),
        }
    }
}
