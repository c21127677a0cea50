//! Setup errors for mock servers and their routes.

use thiserror::Error;

use crate::config::ValidationError;
use crate::net::BindError;

/// Errors raised while configuring or starting a mock server.
#[derive(Debug, Error)]
pub enum MockError {
    /// A sequenced route was given no responders.
    #[error("at least one handler must be provided")]
    EmptyHandlerSequence,

    /// A route path does not start with `/`.
    #[error("route path {0:?} must start with '/'")]
    InvalidRoutePath(String),

    /// Two routes were registered for the same path.
    #[error("route {0:?} is registered more than once")]
    DuplicateRoute(String),

    /// The configuration failed validation.
    #[error("invalid configuration: {}", join(.0))]
    Config(Vec<ValidationError>),

    /// No listener could be bound.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The listener address could not be read back.
    #[error("failed to read listener address: {0}")]
    Io(#[from] std::io::Error),

    /// The bound address did not form a valid base URL.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for setup operations.
pub type MockResult<T> = Result<T, MockError>;
