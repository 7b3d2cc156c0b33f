//! TCP connect probe.
//!
//! Performs standard TCP connect attempts using the operating system's
//! socket API. A completed handshake means the port is open; the stream is
//! dropped immediately afterwards.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{ProbeOutcome, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Probes ports on one host with a full TCP handshake.
///
/// Does not require elevated privileges.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    target: IpAddr,
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a new prober.
    ///
    /// # Arguments
    /// * `target` - Target IP address to probe
    /// * `timeout` - Connection timeout per port
    pub fn new(target: IpAddr, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    pub fn target(&self) -> IpAddr {
        self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify_connect_error(self.target, addr.port(), e)),
            Err(_) => Err(ScanError::Timeout),
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> ProbeOutcome {
        let addr = SocketAddr::new(self.target, port.as_u16());

        match self.attempt_connect(addr).await {
            Ok(stream) => {
                drop(stream);
                ProbeOutcome::Open
            }
            Err(e) => ProbeOutcome::from(&e),
        }
    }
}

/// Returns true iff a TCP connection to `(address, port)` completes within
/// `connect_timeout`. Every failure, including a zero port, reads as false.
pub async fn probe(address: IpAddr, port: u16, connect_timeout: Duration) -> bool {
    match Port::new(port) {
        Some(port) => TcpConnectProber::new(address, connect_timeout)
            .probe(port)
            .await
            .is_open(),
        None => false,
    }
}

fn classify_connect_error(target: IpAddr, port: u16, e: io::Error) -> ScanError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => return ScanError::ConnectionRefused,
        io::ErrorKind::TimedOut => return ScanError::Timeout,
        _ => {}
    }

    let error_str = e.to_string().to_lowercase();
    if error_str.contains("refused") {
        ScanError::ConnectionRefused
    } else if error_str.contains("unreachable") {
        if error_str.contains("host") {
            ScanError::HostUnreachable
        } else {
            ScanError::NetworkUnreachable(e.to_string())
        }
    } else {
        ScanError::ConnectionFailed {
            target: target.to_string(),
            port,
            reason: e.to_string(),
        }
    }
}
