//! Mock server facade.
//!
//! # Data Flow
//! ```text
//! MockRequests::start*(config, random, handlers)
//!     → config::validation
//!     → http::RouteTable (paths checked, order kept)
//!     → net::binder (random port, retry while in use)
//!     → http::MockHttpServer spawned on the runtime
//!
//! Test task:
//!     → assert_no_deferred_error()          (drains the error slot)
//!     → assert_called_exactly_once_each()   (error slot, then every route)
//!     → shutdown().await / Drop
//! ```

pub mod requests;
pub mod types;

pub use requests::MockRequests;
pub use types::{MockError, MockResult};
