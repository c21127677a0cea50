//! Sequenced responders: the Nth call goes to the Nth responder.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::handler::types::{HandlerError, HandlerResult, MockRequest, Respond, Responder};
use crate::mock::types::MockError;

/// Dispatches successive calls to successive responders.
///
/// The cursor is advanced with a single atomic fetch-and-add, so concurrent
/// calls never share an index. Once every responder has been used, further
/// calls fail with [`HandlerError::NoMoreHandlers`] instead of wrapping.
pub struct HandlerChain {
    handlers: Vec<Responder>,
    cursor: AtomicUsize,
}

impl HandlerChain {
    /// Build a chain from a non-empty list of responders.
    pub fn new(handlers: Vec<Responder>) -> Result<Self, MockError> {
        if handlers.is_empty() {
            return Err(MockError::EmptyHandlerSequence);
        }

        Ok(Self {
            handlers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of configured responders.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Index the next call will be dispatched to.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Respond for HandlerChain {
    fn respond(&self, request: &MockRequest) -> HandlerResult {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);

        let handler = self.handlers.get(index).ok_or(HandlerError::NoMoreHandlers {
            index,
            available: self.handlers.len(),
        })?;

        handler.respond(request)
    }

    fn skip(&self) {
        self.cursor.fetch_add(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .field("position", &self.position())
            .finish()
    }
}
