//! Call expectations subsystem.
//!
//! # Data Flow
//! ```text
//! Request dispatched to a route:
//!     → recorder.rs (atomic call counter, returns call index)
//!     → responder fails? → error_slot.rs (deferred, last writer wins)
//!
//! Test task asserts:
//!     → error_slot.rs drained first (handler failures take priority)
//!     → recorder.rs checked per route, in registration order
//!     → types.rs (AssertionError)
//! ```

pub mod error_slot;
pub mod recorder;
pub mod types;

pub use error_slot::ErrorSlot;
pub use recorder::CallRecorder;
pub use types::{AssertionError, AssertionResult};
