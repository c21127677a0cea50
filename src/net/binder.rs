//! Port probing for the mock listener.
//!
//! # Responsibilities
//! - Draw candidate ports from the configured range
//! - Bind a TCP listener, retrying while ports are in use
//! - Fail fast on any other bind error
//!
//! # Design Decisions
//! - The random source is injected so tests can script the draws
//! - Only `AddrInUse` is transient; everything else is fatal
//! - An optional attempt cap turns an exhausted range into an error

use rand::Rng;
use std::io;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{MockConfig, PortRange};

/// Error type for listener binding.
#[derive(Debug, Error)]
pub enum BindError {
    /// Binding failed for a reason other than the port being taken.
    #[error("Failed to bind {addr}: {source}")]
    Fatal {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Every attempt hit a port that was already in use.
    #[error("No free port found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// A listener bound by [`bind_in_range`].
#[derive(Debug)]
pub struct BoundListener {
    /// The underlying TCP listener.
    pub listener: TcpListener,
    /// Port the listener is bound to.
    pub port: u16,
    /// Attempts rejected because the drawn port was in use.
    pub rejected_attempts: u32,
}

/// Returns true for bind errors that mean "try another port".
pub fn is_port_in_use(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::AddrInUse
}

/// The default port source: uniform over `[min, max)`.
pub fn thread_rng_port(min: u16, max: u16) -> u16 {
    rand::thread_rng().gen_range(min..max)
}

/// Bind a listener on a port drawn from `config.port_range`.
///
/// `random` is called with the inclusive lower and exclusive upper bound of
/// the range and must return a port to try.
pub async fn bind_in_range<R>(config: &MockConfig, random: &mut R) -> Result<BoundListener, BindError>
where
    R: FnMut(u16, u16) -> u16 + ?Sized,
{
    let PortRange { start, end } = config.port_range;
    let mut rejected_attempts = 0u32;

    loop {
        if let Some(max) = config.max_bind_attempts {
            if rejected_attempts >= max {
                tracing::warn!(attempts = rejected_attempts, start, end, "Port range exhausted");
                return Err(BindError::Exhausted {
                    attempts: rejected_attempts,
                });
            }
        }

        let port = random(start, end);
        let addr = SocketAddr::new(config.bind_ip, port);

        match bind_addr(config.bind_ip, port).await {
            Ok(listener) => {
                tracing::info!(
                    address = %addr,
                    rejected_attempts,
                    "Mock listener bound"
                );
                return Ok(BoundListener {
                    listener,
                    port,
                    rejected_attempts,
                });
            }
            Err(e) if is_port_in_use(&e) => {
                rejected_attempts += 1;
                tracing::debug!(port, attempt = rejected_attempts, "Port in use, retrying");
            }
            Err(source) => {
                tracing::error!(address = %addr, error = %source, "Failed to bind mock listener");
                return Err(BindError::Fatal { addr, source });
            }
        }
    }
}

async fn bind_addr(ip: IpAddr, port: u16) -> io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::new(ip, port)).await
}
