//! Shared accumulator for open ports.

use super::ScanEntry;
use crate::types::Port;
use std::sync::{Mutex, PoisonError};

/// Collects entries from every worker. Append order is arbitrary; callers
/// get a sorted copy once the scan has finished.
#[derive(Debug, Default)]
pub struct ResultSink {
    entries: Mutex<Vec<ScanEntry>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an open port and its service name.
    pub fn record(&self, port: Port, service: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScanEntry::new(port, service));
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the collected entries, sorted ascending by port, leaving the
    /// sink empty.
    pub fn drain_sorted(&self) -> Vec<ScanEntry> {
        let mut entries =
            std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner));
        entries.sort_by_key(|e| e.port);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_sorted() {
        let sink = ResultSink::new();
        for p in [443, 22, 80] {
            sink.record(Port::new(p).unwrap(), crate::services::lookup(p));
        }
        assert_eq!(sink.len(), 3);

        let ports: Vec<u16> = sink.drain_sorted().iter().map(|e| e.port.as_u16()).collect();
        assert_eq!(ports, vec![22, 80, 443]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_sink() {
        let sink = ResultSink::new();
        assert!(sink.is_empty());
        assert!(sink.drain_sorted().is_empty());
    }
}
