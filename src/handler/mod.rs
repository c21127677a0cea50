//! Route handler subsystem.
//!
//! # Data Flow
//! ```text
//! RouteHandler (path + CallRecorder)
//!     → Responder (Respond trait: respond, skip)
//!         ├─ FixedResponse        same body every call
//!         ├─ ValidatingHandler    body must match, then fixed body
//!         ├─ HandlerChain         Nth call → Nth responder, then NoMoreHandlers
//!         └─ closure              Fn(&MockRequest) -> HandlerResult
//! ```
//!
//! # Design Decisions
//! - Responders are plain values behind `Arc<dyn Respond>`, stored in order
//! - Sequencing uses an atomic cursor, never a lock
//! - Responders never touch the call counter; the server records calls

pub mod route;
pub mod sequenced;
pub mod types;
pub mod validate;

pub use route::RouteHandler;
pub use sequenced::HandlerChain;
pub use types::{FixedResponse, HandlerError, HandlerResult, MockRequest, Respond, Responder};
pub use validate::ValidatingHandler;
