//! Request view, responder trait and handler error definitions.

use axum::http::{HeaderMap, Method};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while a route produces its response.
///
/// These never reach the client as a failed connection: the server turns them
/// into a diagnostic body and defers them for
/// [`MockRequests::assert_no_deferred_error`](crate::MockRequests::assert_no_deferred_error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A sequenced route was called more often than it has responders.
    #[error("No more handlers are available for the request (call {index}, {available} configured)")]
    NoMoreHandlers { index: usize, available: usize },

    /// A validating responder received an unexpected body.
    #[error("Expected content to be equivalent to {expected:?}, but found {actual:?}")]
    ContentMismatch { expected: String, actual: String },

    /// A responder panicked, usually through a failed `assert!`.
    #[error("Handler panicked: {0}")]
    Panicked(String),

    /// The request body could not be read.
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// Any failure reported by a custom responder.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Build a custom failure from any message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result type for responders.
pub type HandlerResult = Result<String, HandlerError>;

/// An incoming request as seen by a responder.
#[derive(Debug, Clone)]
pub struct MockRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Vec<u8>,
    params: HashMap<String, String>,
}

impl MockRequest {
    /// Build a request view. Query parameters are decoded from `query`.
    pub fn new(
        method: Method,
        path: impl Into<String>,
        query: Option<&str>,
        headers: HeaderMap,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        let params = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        Self {
            method,
            path: path.into(),
            headers,
            body: body.into(),
            params,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text, if present and valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request body decoded as UTF-8, replacing invalid sequences.
    pub fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Query parameters by name.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Produces the response body for a single call.
pub trait Respond: Send + Sync {
    fn respond(&self, request: &MockRequest) -> HandlerResult;

    /// Account for a recorded call that never reached [`Respond::respond`].
    ///
    /// Sequenced responders advance past the slot the call would have used,
    /// so the Nth recorded call keeps mapping to the Nth responder.
    fn skip(&self) {}
}

impl<F> Respond for F
where
    F: Fn(&MockRequest) -> HandlerResult + Send + Sync,
{
    fn respond(&self, request: &MockRequest) -> HandlerResult {
        self(request)
    }
}

/// Shared, type-erased responder.
pub type Responder = Arc<dyn Respond>;

/// Always answers with the same body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedResponse(String);

impl FixedResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn body(&self) -> &str {
        &self.0
    }
}

impl Respond for FixedResponse {
    fn respond(&self, _request: &MockRequest) -> HandlerResult {
        Ok(self.0.clone())
    }
}

impl fmt::Display for FixedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
