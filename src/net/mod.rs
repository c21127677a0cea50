//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! MockConfig (bind_ip, port_range, max_bind_attempts)
//!     → binder.rs (draw port → bind → AddrInUse? draw again)
//!     → BoundListener (tokio TcpListener + chosen port)
//!     → Hand off to HTTP layer
//! ```

pub mod binder;

pub use binder::{bind_in_range, is_port_in_use, thread_rng_port, BindError, BoundListener};
