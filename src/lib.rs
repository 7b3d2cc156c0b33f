//! # portsweep - a concurrent TCP port scanner
//!
//! portsweep probes every port in a range with plain TCP connects, spread
//! over a fixed pool of worker tasks, and reports the ports that accepted a
//! connection together with the service usually found there.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{scan_host, ScanJob, ScanOutcome};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let job = ScanJob::new("1-1024".parse().unwrap())
//!         .with_threads(100)
//!         .with_timeout(Duration::from_millis(500));
//!
//!     match scan_host("127.0.0.1", &job, CancellationToken::new()).await {
//!         ScanOutcome::Completed(report) => {
//!             for entry in &report.results {
//!                 println!("{} {}", entry.port, entry.service);
//!             }
//!         }
//!         ScanOutcome::Aborted { reason, .. } => eprintln!("aborted: {}", reason),
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port ranges and targets
//! - [`scanner`] - Probe, worklist, result sink, progress and the coordinator
//! - [`services`] - Static port to service name table
//! - [`output`] - Terminal rendering and JSON/CSV/text export
//! - [`config`] - Settings file handling
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use scanner::{ProbeOutcome, Prober, ScanEntry, ScanJob, ScanOutcome, ScanReport};
pub use types::{Port, PortRange, ScanTarget, TargetSpec};
