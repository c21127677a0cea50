//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! binder, server, dispatch:
//!     → tracing events (bind attempts, dispatched calls, handler failures)
//!     → tower_http TraceLayer spans (one per request, tagged with x-request-id)
//!
//! Consumers:
//!     → logging.rs subscriber (captured per test by libtest)
//! ```

pub mod logging;

pub use logging::init_logging;
