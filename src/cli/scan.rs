//! Scan subcommand implementation.
//!
//! Handles the `portsweep scan <target>` command.

use super::ExitStatus;
use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::scanner::{self, AbortReason, ScanJob, ScanOutcome};
use crate::types::PortRange;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Scan a target for open ports.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Target to scan (IP address or hostname)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan, "<start>-<end>" or a single port [default: 1-1024]
    #[arg(short, long, value_name = "RANGE")]
    pub ports: Option<String>,

    /// Number of concurrent workers [default: 100]
    #[arg(short, long, value_name = "N", value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Connection timeout per port, in seconds [default: 1.0]
    #[arg(short = 'T', long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Export results to FILE (.json, .csv, anything else is text)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, settings: &AppSettings, quiet: bool) -> CliResult<ExitStatus> {
        let job = self.build_job(settings, quiet)?;

        let cancel = CancellationToken::new();
        let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

        let outcome = scanner::scan_host(&self.target, &job, cancel).await;
        interrupt.abort();

        match outcome {
            ScanOutcome::Completed(report) => {
                output::print_report(&report)?;

                if let Some(ref path) = self.output {
                    match output::export(&report, path) {
                        Ok(format) => output::print_success(&format!(
                            "Results exported to {} ({})",
                            path.display(),
                            format
                        )),
                        Err(e) => {
                            warn!(error = %e, "export failed");
                            output::print_warning(&format!("Could not export results: {}", e));
                        }
                    }
                }

                Ok(ExitStatus::Success)
            }
            ScanOutcome::Aborted {
                reason: AbortReason::Interrupted,
                probes_completed,
            } => {
                output::print_aborted(probes_completed, job.ports().len());
                Ok(ExitStatus::Interrupted)
            }
            ScanOutcome::Aborted { reason, .. } => Err(reason.into()),
        }
    }

    /// Merge flags with settings into a validated job. Fails before any
    /// network activity.
    fn build_job(&self, settings: &AppSettings, quiet: bool) -> CliResult<ScanJob> {
        let ports: PortRange = self
            .ports
            .as_deref()
            .unwrap_or(&settings.default_ports)
            .parse()?;

        let threads = self.threads.unwrap_or(settings.default_threads);
        if threads == 0 {
            return Err(CliError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }

        let timeout = match self.timeout {
            Some(timeout) => timeout,
            None => Duration::try_from_secs_f64(settings.default_timeout_secs).map_err(|_| {
                CliError::InvalidConfig(format!(
                    "invalid default timeout: {}",
                    settings.default_timeout_secs
                ))
            })?,
        };

        Ok(ScanJob::new(ports)
            .with_threads(threads)
            .with_timeout(timeout)
            .with_progress_interval(Duration::from_millis(settings.progress_interval_ms))
            .with_progress_display(!quiet))
    }
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        debug!("interrupt received");
        cancel.cancel();
    }
}

fn parse_threads(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid thread count: {}", s)),
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout: {}", s))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("timeout must be a non-negative number of seconds: {}", s))
}
