//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net::binder listener)
//!     → server.rs (Axum setup, middleware, catch-all route)
//!     → request.rs (request ID, buffer body, build MockRequest)
//!     → RouteTable lookup → record call → responder (failure barrier)
//!     → response.rs (body, or "Exception in handler: ..." diagnostic)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::DIAGNOSTIC_PREFIX;
pub use server::{AppState, MockHttpServer, RouteTable};
