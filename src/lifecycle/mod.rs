//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (mock::requests):
//!     Validate config → Probe port → Spawn server task
//!
//! Shutdown (shutdown.rs):
//!     MockRequests::shutdown / Drop → Trigger → Stop accepting → Close socket
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
