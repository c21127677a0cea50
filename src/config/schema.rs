//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a mock server.
//! All types derive Serde traits so a test suite can keep its settings in a
//! TOML file next to its fixtures.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration for a [`MockRequests`](crate::MockRequests) server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    /// Host name written into the base URL handed to clients.
    pub host: String,

    /// Interface the listener binds to.
    pub bind_ip: IpAddr,

    /// Ports probed when looking for a free one.
    pub port_range: PortRange,

    /// Upper bound on bind attempts. `None` retries until a port is free.
    pub max_bind_attempts: Option<u32>,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port_range: PortRange::default(),
            max_bind_attempts: Some(1000),
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Half-open port range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortRange {
    /// First candidate port (inclusive).
    pub start: u16,

    /// Last candidate port (exclusive).
    pub end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Number of ports in the range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start..self.end).contains(&port)
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: 8100,
            end: 8200,
        }
    }
}
