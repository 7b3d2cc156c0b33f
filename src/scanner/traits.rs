//! Prober trait abstraction.
//!
//! The coordinator only needs to know whether a port answered. Putting the
//! probe behind a trait lets the same worker pool run against the network or
//! against a scripted oracle in tests.

use crate::error::ScanError;
use crate::types::Port;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified outcome of a single probe.
///
/// Everything except `Open` means "closed" to the scanner; the split exists
/// so failures can be tallied by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The TCP handshake completed within the timeout.
    Open,
    /// The host answered with a reset.
    Refused,
    /// No answer before the timeout elapsed.
    TimedOut,
    /// Host or network unreachable.
    Unreachable,
    /// Any other socket-level failure.
    Failed,
}

impl ProbeOutcome {
    /// Whether the probe found the port accepting connections.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<&ScanError> for ProbeOutcome {
    fn from(err: &ScanError) -> Self {
        match err {
            ScanError::ConnectionRefused => Self::Refused,
            ScanError::Timeout => Self::TimedOut,
            ScanError::HostUnreachable | ScanError::NetworkUnreachable(_) => Self::Unreachable,
            ScanError::ConnectionFailed { .. } => Self::Failed,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Refused => write!(f, "refused"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Trait for anything that can answer "does this port accept connections?".
///
/// Implementations must not panic and must not retry; every failure is
/// reported through the returned [`ProbeOutcome`].
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single port.
    async fn probe(&self, port: Port) -> ProbeOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(ProbeOutcome::Open.to_string(), "open");
        assert_eq!(ProbeOutcome::Refused.to_string(), "refused");
        assert_eq!(ProbeOutcome::TimedOut.to_string(), "timed out");
    }

    #[test]
    fn test_only_open_is_open() {
        assert!(ProbeOutcome::Open.is_open());
        for outcome in [
            ProbeOutcome::Refused,
            ProbeOutcome::TimedOut,
            ProbeOutcome::Unreachable,
            ProbeOutcome::Failed,
        ] {
            assert!(!outcome.is_open());
        }
    }

    #[test]
    fn test_outcome_from_error() {
        assert_eq!(ProbeOutcome::from(&ScanError::Timeout), ProbeOutcome::TimedOut);
        assert_eq!(
            ProbeOutcome::from(&ScanError::ConnectionRefused),
            ProbeOutcome::Refused
        );
        assert_eq!(
            ProbeOutcome::from(&ScanError::NetworkUnreachable("no route".into())),
            ProbeOutcome::Unreachable
        );
    }
}
