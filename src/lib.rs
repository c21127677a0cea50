//! Mock HTTP server for testing HTTP clients.
//!
//! Register the routes a client is expected to call, point the client at
//! [`MockRequests::url`], then assert that every route was called as often as
//! configured and that no handler failed along the way.

pub mod config;
pub mod expectations;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod mock;
pub mod net;
pub mod observability;

pub use config::MockConfig;
pub use expectations::AssertionError;
pub use handler::{HandlerError, MockRequest, Respond, Responder, RouteHandler, ValidatingHandler};
pub use mock::{MockError, MockRequests};
