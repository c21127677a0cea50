//! Assertion error definitions.

use thiserror::Error;

use crate::handler::types::HandlerError;

/// Failures reported by the assertion operations of
/// [`MockRequests`](crate::MockRequests).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// A route handler failed while serving a request.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// A route was never requested.
    #[error("{url} was not called")]
    NotCalled { url: String },

    /// A route was requested more often than it was configured for.
    #[error("{url} was only expected to be called {expected} time(s). Instead, was called {actual} times")]
    CalledTooOften {
        url: String,
        expected: usize,
        actual: usize,
    },

    /// A route was requested fewer times than it was configured for.
    #[error("{url} was expected to be called {expected} time(s). Instead, was called {actual} times")]
    CalledTooFew {
        url: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for assertion operations.
pub type AssertionResult = Result<(), AssertionError>;
