//! Route handlers: a path, its responder and its call expectations.

use std::sync::Arc;

use crate::expectations::{AssertionResult, CallRecorder};
use crate::handler::sequenced::HandlerChain;
use crate::handler::types::{FixedResponse, HandlerResult, MockRequest, Responder};
use crate::handler::validate::ValidatingHandler;
use crate::mock::types::MockError;

/// A mocked path together with the behavior it serves.
///
/// Single-responder routes answer every call the same way and expect one
/// call. Sequenced routes expect exactly as many calls as they have
/// responders. Clones share the call counter, so one handler can be handed to
/// several servers.
#[derive(Clone)]
pub struct RouteHandler {
    path: String,
    responder: Responder,
    recorder: Arc<CallRecorder>,
}

impl RouteHandler {
    fn with_expected(path: impl Into<String>, responder: Responder, expected: usize) -> Self {
        Self {
            path: path.into(),
            responder,
            recorder: Arc::new(CallRecorder::new(expected)),
        }
    }

    /// Answer every call with `body`.
    pub fn fixed(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_expected(path, Arc::new(FixedResponse::new(body)), 1)
    }

    /// Answer every call with an empty body.
    pub fn empty(path: impl Into<String>) -> Self {
        Self::fixed(path, "")
    }

    /// Answer with each body in turn, one per call.
    pub fn responses<I, S>(path: impl Into<String>, bodies: I) -> Result<Self, MockError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handlers = bodies
            .into_iter()
            .map(|body| Arc::new(FixedResponse::new(body)) as Responder)
            .collect();
        Self::sequence(path, handlers)
    }

    /// Require the body to be equivalent to `expected_content`, then answer
    /// with `response`.
    pub fn validating(
        path: impl Into<String>,
        expected_content: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        let handler = ValidatingHandler::new(expected_content, response);
        Self::with_expected(path, Arc::new(handler), 1)
    }

    /// Validate each call against the next handler in `handlers`.
    pub fn validating_sequence(
        path: impl Into<String>,
        handlers: Vec<ValidatingHandler>,
    ) -> Result<Self, MockError> {
        let handlers = handlers
            .into_iter()
            .map(|handler| Arc::new(handler) as Responder)
            .collect();
        Self::sequence(path, handlers)
    }

    /// Dispatch the Nth call to the Nth responder.
    pub fn sequence(path: impl Into<String>, handlers: Vec<Responder>) -> Result<Self, MockError> {
        let path = path.into();
        let chain = HandlerChain::new(handlers)?;
        let expected = chain.len();
        Ok(Self::with_expected(path, Arc::new(chain), expected))
    }

    /// Answer every call with a custom responder.
    pub fn from_fn<F>(path: impl Into<String>, f: F) -> Self
    where
        F: Fn(&MockRequest) -> HandlerResult + Send + Sync + 'static,
    {
        Self::with_expected(path, Arc::new(f), 1)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Calls received so far.
    pub fn called(&self) -> usize {
        self.recorder.called()
    }

    /// Calls this route is configured for.
    pub fn expected(&self) -> usize {
        self.recorder.expected()
    }

    /// Record an incoming call, returning its 0-based index.
    pub fn record_call(&self) -> usize {
        self.recorder.record_call()
    }

    /// Produce the response for `request` without touching the counter.
    pub fn respond(&self, request: &MockRequest) -> HandlerResult {
        self.responder.respond(request)
    }

    /// Give up on a recorded call without answering it.
    pub fn skip(&self) {
        self.responder.skip()
    }

    /// Check the recorded calls against the expectation.
    pub fn check_calls(&self) -> AssertionResult {
        self.recorder.check(&self.path)
    }
}

impl std::fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandler")
            .field("path", &self.path)
            .field("called", &self.called())
            .field("expected", &self.expected())
            .finish()
    }
}
