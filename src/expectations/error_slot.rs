//! Single-slot store for errors raised on server tasks.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::handler::types::HandlerError;

/// Holds at most one deferred handler error.
///
/// Writers overwrite whatever is stored (last writer wins); there is no
/// ordering between concurrent failures. Reading with [`ErrorSlot::take`]
/// empties the slot.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    inner: Mutex<Option<HandlerError>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an error, replacing any previous one.
    pub fn store(&self, error: HandlerError) {
        *self.lock() = Some(error);
    }

    /// Remove and return the stored error, if any.
    pub fn take(&self) -> Option<HandlerError> {
        self.lock().take()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    // Poisoning is ignored: the slot only ever holds a complete value.
    fn lock(&self) -> MutexGuard<'_, Option<HandlerError>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
