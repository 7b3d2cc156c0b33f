//! Completed-probe counter shared between workers and the monitor loop.

use super::ProbeOutcome;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts finished probes, open or not.
///
/// Built once, before any worker starts, and shared by `Arc`.
#[derive(Debug)]
pub struct ProgressTracker {
    done: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            done: AtomicUsize::new(0),
            total,
        }
    }

    /// Mark one more probe as finished.
    pub fn advance(&self) {
        self.done.fetch_add(1, Ordering::AcqRel);
    }

    /// Current count. May lag behind concurrent `advance` calls.
    pub fn read(&self) -> usize {
        self.done.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.read() >= self.total
    }

    /// Completion percentage in `0.0..=100.0`. An empty scan counts as done.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.read() as f64 * 100.0 / self.total as f64
    }
}

/// Per-kind probe outcome counters.
#[derive(Debug, Default)]
pub struct OutcomeTally {
    open: AtomicUsize,
    refused: AtomicUsize,
    timed_out: AtomicUsize,
    unreachable: AtomicUsize,
    failed: AtomicUsize,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note(&self, outcome: ProbeOutcome) {
        let counter = match outcome {
            ProbeOutcome::Open => &self.open,
            ProbeOutcome::Refused => &self.refused,
            ProbeOutcome::TimedOut => &self.timed_out,
            ProbeOutcome::Unreachable => &self.unreachable,
            ProbeOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OutcomeCounts {
        OutcomeCounts {
            open: self.open.load(Ordering::Relaxed),
            refused: self.refused.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            unreachable: self.unreachable.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of an [`OutcomeTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub open: usize,
    pub refused: usize,
    pub timed_out: usize,
    pub unreachable: usize,
    pub failed: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.open + self.refused + self.timed_out + self.unreachable + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_advance_and_read() {
        let progress = ProgressTracker::new(4);
        assert_eq!(progress.read(), 0);
        assert!(!progress.is_complete());

        progress.advance();
        progress.advance();
        assert_eq!(progress.read(), 2);
        assert_eq!(progress.percent(), 50.0);

        progress.advance();
        progress.advance();
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn test_concurrent_advance() {
        let progress = Arc::new(ProgressTracker::new(4000));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let progress = Arc::clone(&progress);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        progress.advance();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.read(), 4000);
    }

    #[test]
    fn test_outcome_tally() {
        let tally = OutcomeTally::new();
        tally.note(ProbeOutcome::Open);
        tally.note(ProbeOutcome::Refused);
        tally.note(ProbeOutcome::Refused);
        tally.note(ProbeOutcome::TimedOut);

        let counts = tally.snapshot();
        assert_eq!(counts.open, 1);
        assert_eq!(counts.refused, 2);
        assert_eq!(counts.timed_out, 1);
        assert_eq!(counts.unreachable, 0);
        assert_eq!(counts.total(), 4);
    }
}
