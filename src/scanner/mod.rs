//! Scanner module - the concurrent scan engine.
//!
//! A scan resolves its target, fills a [`Worklist`] with every port of the
//! range and starts a fixed pool of worker tasks. Each worker pulls ports
//! until the worklist is empty, probes them, and records open ports in a
//! shared [`ResultSink`]. The coordinator meanwhile polls a
//! [`ProgressTracker`] to drive the progress bar and watches a
//! [`CancellationToken`] for interrupts.
//!
//! Cancellation is weak: on interrupt the coordinator stops waiting and
//! reports an abort straight away. Workers see the token between probes and
//! exit after their in-flight probe, but their handles are detached rather
//! than joined.

pub mod progress;
pub mod sink;
pub mod tcp;
pub mod traits;
pub mod worklist;

use crate::output;
use crate::services;
use crate::types::{Port, PortRange, ScanTarget, TargetError, TargetSpec};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use progress::{OutcomeCounts, OutcomeTally, ProgressTracker};
pub use sink::ResultSink;
pub use tcp::{probe, TcpConnectProber};
pub use traits::{ProbeOutcome, Prober};
pub use worklist::Worklist;

/// Default number of concurrent workers.
pub const DEFAULT_THREADS: usize = 100;

/// Default per-probe connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default interval between progress redraws.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(200);

/// An open port and the service usually found there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanEntry {
    pub port: Port,
    pub service: String,
}

impl ScanEntry {
    pub fn new(port: Port, service: impl Into<String>) -> Self {
        Self {
            port,
            service: service.into(),
        }
    }
}

/// Lifecycle of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Initialized,
    Resolving,
    Scanning,
    Finalizing,
    Completed,
    Aborted,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialized => "initialized",
            Self::Resolving => "resolving",
            Self::Scanning => "scanning",
            Self::Finalizing => "finalizing",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Normalized parameters for one scan.
#[derive(Debug, Clone)]
pub struct ScanJob {
    ports: PortRange,
    threads: usize,
    timeout: Duration,
    progress_interval: Duration,
    display: bool,
}

impl ScanJob {
    /// Create a job over `ports` with default threads and timeout.
    pub fn new(ports: PortRange) -> Self {
        Self {
            ports,
            threads: DEFAULT_THREADS,
            timeout: DEFAULT_TIMEOUT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            display: false,
        }
    }

    /// Set the worker count. Zero is raised to one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        // tokio intervals panic on a zero period
        self.progress_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Print the scan header and a live progress bar.
    pub fn with_progress_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn ports(&self) -> PortRange {
        self.ports
    }

    /// Workers actually spawned: never more than there are ports.
    pub fn threads(&self) -> usize {
        self.threads.min(self.ports.len()).max(1)
    }

    pub fn requested_threads(&self) -> usize {
        self.threads
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn progress_interval(&self) -> Duration {
        self.progress_interval
    }

    pub fn displays_progress(&self) -> bool {
        self.display
    }
}

/// Everything known about a scan that ran to completion.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: ScanTarget,
    pub ports: PortRange,
    pub ports_scanned: usize,
    pub threads: usize,
    pub duration: Duration,
    /// Open ports, ascending, one entry per port.
    pub results: Vec<ScanEntry>,
    pub outcomes: OutcomeCounts,
}

impl ScanReport {
    pub fn open_ports(&self) -> usize {
        self.results.len()
    }
}

/// Why a scan stopped before producing a report.
#[derive(Debug, thiserror::Error)]
pub enum AbortReason {
    #[error(transparent)]
    Resolution(#[from] TargetError),

    #[error("scan interrupted")]
    Interrupted,

    #[error("worker task failed: {0}")]
    WorkerFailed(String),
}

/// Terminal state of a scan.
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Aborted {
        reason: AbortReason,
        /// Probes finished before the coordinator stopped waiting.
        probes_completed: usize,
    },
}

impl ScanOutcome {
    pub fn state(&self) -> ScanState {
        match self {
            Self::Completed(_) => ScanState::Completed,
            Self::Aborted { .. } => ScanState::Aborted,
        }
    }

    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Aborted { .. } => None,
        }
    }

    fn aborted(reason: AbortReason, probes_completed: usize) -> Self {
        debug!(state = %ScanState::Aborted, %reason, probes_completed);
        Self::Aborted {
            reason,
            probes_completed,
        }
    }
}

/// Resolve `target` and scan it with TCP connect probes.
///
/// Resolution failure aborts before any probe is sent.
pub async fn scan_host(target: &str, job: &ScanJob, cancel: CancellationToken) -> ScanOutcome {
    debug!(
        state = %ScanState::Initialized,
        host = target,
        ports = %job.ports(),
        threads = job.threads(),
        timeout_ms = job.timeout().as_millis() as u64
    );

    debug!(state = %ScanState::Resolving, host = target);
    let resolved = tokio::select! {
        _ = cancel.cancelled() => return ScanOutcome::aborted(AbortReason::Interrupted, 0),
        resolved = resolve(target) => resolved,
    };

    let target = match resolved {
        Ok(target) => target,
        Err(e) => return ScanOutcome::aborted(AbortReason::Resolution(e), 0),
    };

    let prober = Arc::new(TcpConnectProber::new(target.ip, job.timeout()));
    run_scan(prober, target, job, cancel).await
}

async fn resolve(target: &str) -> Result<ScanTarget, TargetError> {
    TargetSpec::parse(target)?.resolve().await
}

/// Scan an already resolved target with the given prober.
pub async fn run_scan<P>(
    prober: Arc<P>,
    target: ScanTarget,
    job: &ScanJob,
    cancel: CancellationToken,
) -> ScanOutcome
where
    P: Prober + 'static,
{
    let range = job.ports();
    let total = range.len();
    let threads = job.threads();
    if threads < job.requested_threads() {
        debug!(
            requested = job.requested_threads(),
            threads, "more workers requested than ports; clamping"
        );
    }

    // All shared state exists before the first worker starts.
    let worklist = Arc::new(Worklist::new(range.iter()));
    let sink = Arc::new(ResultSink::new());
    let progress = Arc::new(ProgressTracker::new(total));
    let tally = Arc::new(OutcomeTally::new());

    if job.displays_progress() {
        output::print_scan_header(&target, job);
    }

    debug!(state = %ScanState::Scanning, total, threads);
    let start_time = Instant::now();

    let handles: Vec<JoinHandle<()>> = (0..threads)
        .map(|id| {
            tokio::spawn(worker(
                id,
                Arc::clone(&prober),
                Arc::clone(&worklist),
                Arc::clone(&sink),
                Arc::clone(&progress),
                Arc::clone(&tally),
                cancel.clone(),
            ))
        })
        .collect();

    let bar = progress_bar(total, job.displays_progress());
    let mut ticker = tokio::time::interval(job.progress_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                bar.abandon_with_message("aborted");
                // Handles are dropped, not awaited: workers wind down on their own.
                return ScanOutcome::aborted(AbortReason::Interrupted, progress.read());
            }
            _ = ticker.tick() => {
                bar.set_position(progress.read() as u64);
                // A worker that died early would otherwise leave us polling forever.
                if progress.is_complete() || handles.iter().all(JoinHandle::is_finished) {
                    break;
                }
            }
        }
    }

    // Workers also stop on the token, so a cancel that lands between polls
    // can leave them all finished with ports still unprobed.
    if cancel.is_cancelled() && !progress.is_complete() {
        bar.abandon_with_message("aborted");
        return ScanOutcome::aborted(AbortReason::Interrupted, progress.read());
    }

    debug!(state = %ScanState::Finalizing);
    for joined in join_all(handles).await {
        if let Err(e) = joined {
            bar.abandon_with_message("failed");
            warn!(error = %e, "scan worker failed");
            return ScanOutcome::aborted(AbortReason::WorkerFailed(e.to_string()), progress.read());
        }
    }
    bar.finish_and_clear();

    let duration = start_time.elapsed();
    let results = sink.drain_sorted();
    let outcomes = tally.snapshot();

    info!(
        host = %target,
        open = results.len(),
        duration_ms = duration.as_millis() as u64,
        "scan completed"
    );
    debug!(
        refused = outcomes.refused,
        timed_out = outcomes.timed_out,
        unreachable = outcomes.unreachable,
        failed = outcomes.failed,
        "closed port breakdown"
    );
    debug!(state = %ScanState::Completed);

    ScanOutcome::Completed(ScanReport {
        target,
        ports: range,
        ports_scanned: progress.read(),
        threads,
        duration,
        results,
        outcomes,
    })
}

/// Drain the worklist until it is empty or the scan is cancelled.
async fn worker<P: Prober>(
    id: usize,
    prober: Arc<P>,
    worklist: Arc<Worklist>,
    sink: Arc<ResultSink>,
    progress: Arc<ProgressTracker>,
    tally: Arc<OutcomeTally>,
    cancel: CancellationToken,
) {
    let mut probed = 0usize;

    while !cancel.is_cancelled() {
        let Some(port) = worklist.take_next() else {
            break;
        };

        let outcome = prober.probe(port).await;
        if outcome.is_open() {
            sink.record(port, services::lookup(port.as_u16()));
        }
        tally.note(outcome);
        progress.advance();
        probed += 1;
    }

    debug!(worker = id, probed, "worker finished");
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        Ok(style) => bar.set_style(style.progress_chars("=>-")),
        Err(e) => debug!(error = %e, "falling back to default progress style"),
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::net::{IpAddr, Ipv4Addr};

    /// Answers from a fixed set of open ports.
    struct Oracle(HashSet<u16>);

    #[async_trait]
    impl Prober for Oracle {
        async fn probe(&self, port: Port) -> ProbeOutcome {
            tokio::task::yield_now().await;
            if self.0.contains(&port.as_u16()) {
                ProbeOutcome::Open
            } else {
                ProbeOutcome::Refused
            }
        }
    }

    fn localhost() -> ScanTarget {
        ScanTarget::new("localhost", IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    fn job(range: &str, threads: usize) -> ScanJob {
        ScanJob::new(range.parse().unwrap())
            .with_threads(threads)
            .with_progress_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_thread_clamping() {
        assert_eq!(job("79-81", 100).threads(), 3);
        assert_eq!(job("79-81", 100).requested_threads(), 100);
        assert_eq!(job("1-1024", 0).threads(), 1);
        assert_eq!(job("1-1024", 50).threads(), 50);
    }

    #[test]
    fn test_job_defaults() {
        let job = ScanJob::new(PortRange::default());
        assert_eq!(job.threads(), DEFAULT_THREADS);
        assert_eq!(job.timeout(), Duration::from_secs(1));
        assert_eq!(job.progress_interval(), Duration::from_millis(200));
        assert!(!job.displays_progress());
    }

    #[tokio::test]
    async fn test_only_port_80_open() {
        let oracle = Arc::new(Oracle(HashSet::from([80])));
        let outcome = run_scan(oracle, localhost(), &job("79-81", 3), CancellationToken::new()).await;

        let report = outcome.report().expect("scan should complete");
        assert_eq!(report.results, vec![ScanEntry::new(Port::new(80).unwrap(), "HTTP")]);
        assert_eq!(report.ports_scanned, 3);
        assert_eq!(report.outcomes.refused, 2);
    }

    #[tokio::test]
    async fn test_unknown_service_name() {
        let oracle = Arc::new(Oracle(HashSet::from([8888])));
        let outcome =
            run_scan(oracle, localhost(), &job("8880-8890", 4), CancellationToken::new()).await;

        let report = outcome.report().unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].service, "unknown");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let oracle = Arc::new(Oracle(HashSet::from([22])));
        let outcome = run_scan(oracle, localhost(), &job("1-100", 4), cancel).await;

        assert_eq!(outcome.state(), ScanState::Aborted);
        assert!(outcome.report().is_none());
    }

    #[tokio::test]
    async fn test_scan_host_rejects_malformed_target() {
        let outcome = scan_host("bad..host", &job("1-10", 2), CancellationToken::new()).await;
        match outcome {
            ScanOutcome::Aborted {
                reason: AbortReason::Resolution(_),
                probes_completed,
            } => assert_eq!(probes_completed, 0),
            other => panic!("expected resolution abort, got {:?}", other),
        }
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ScanState::Scanning.to_string(), "scanning");
        assert_eq!(ScanState::Aborted.to_string(), "aborted");
    }
}
