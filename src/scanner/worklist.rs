//! Shared queue of ports still waiting to be probed.

use crate::types::Port;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A consume-once queue of ports shared by all workers.
///
/// The emptiness check and the removal happen under the same lock, so two
/// workers can never receive the same port and no port is skipped. Ports are
/// only ever removed.
#[derive(Debug)]
pub struct Worklist {
    pending: Mutex<Vec<Port>>,
    total: usize,
}

impl Worklist {
    /// Build a worklist that hands out `ports` in their given order.
    pub fn new(ports: impl IntoIterator<Item = Port>) -> Self {
        let mut pending: Vec<Port> = ports.into_iter().collect();
        // Popped from the back.
        pending.reverse();
        let total = pending.len();
        Self {
            pending: Mutex::new(pending),
            total,
        }
    }

    /// Remove and return the next unclaimed port, or `None` once drained.
    pub fn take_next(&self) -> Option<Port> {
        self.lock().pop()
    }

    /// Number of ports not yet handed out.
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    /// Number of ports the worklist started with.
    pub fn total(&self) -> usize {
        self.total
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Port>> {
        // A panicking holder cannot leave the Vec half-updated.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
